#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("driver_id {0} appears on more than one route")]
    DuplicateDriver(u32),
    #[error("route for driver {driver_id} has {stops} stops, expected a departure and a return depot stop")]
    MissingDepotStops { driver_id: u32, stops: usize },
}
