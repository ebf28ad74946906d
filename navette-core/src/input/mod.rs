mod collector;
mod error;
pub mod parse_ops;

pub use collector::PointCollector;
pub use error::InputError;
pub use parse_ops::{
    parse_capacity, parse_coordinate_pair, parse_lat_lng, parse_latitude, parse_longitude,
    parse_max_distance_km, parse_passenger_count, parse_vehicle_count, validate_capacity,
    validate_latitude, validate_longitude, validate_max_distance_km, validate_vehicle_count,
};

/// optimization is refused below this many delivery points.
pub const MIN_DELIVERY_POINTS: usize = 2;

/// vehicle count offered before the user edits it.
pub const DEFAULT_VEHICLE_COUNT: u32 = 2;
