mod route_summary;

pub use route_summary::{DriverSummary, FleetStats, RouteSummary, RouteTotals};
