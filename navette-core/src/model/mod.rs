mod error;
mod lat_lng;
mod point;
mod request;
mod response;
mod route;
pub mod route_record;

pub use error::ModelError;
pub use lat_lng::{Coordinate, LatLng};
pub use point::Point;
pub use request::{FleetOptimizationRequest, OptimizationRequest};
pub use response::OptimizationResponse;
pub use route::{Route, Stop};
pub use route_record::{DriverRecords, DriverStop, RouteRecord};
