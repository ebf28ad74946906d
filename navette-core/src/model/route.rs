use geo::LineString;
use serde::{Deserialize, Serialize};

use super::{Coordinate, ModelError};

/// one vehicle's tour as returned by the routing service.
///
/// `stops` starts and ends at the depot, so a tour visiting three pickups
/// carries five stops.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Route {
    pub driver_id: u32,
    /// polyline vertices in driving order
    pub points: Vec<Coordinate>,
    pub stops: Vec<Stop>,
    /// tour length in kilometers
    #[serde(default)]
    pub distance: f64,
    /// passengers picked up over the tour
    #[serde(default)]
    pub load: u32,
}

/// an ordered waypoint within a [`Route`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coords: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_num: Option<u32>,
}

impl Route {
    /// number of stops between leaving and returning to the depot.
    pub fn intermediate_stop_count(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }

    pub fn departure(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn return_stop(&self) -> Option<&Stop> {
        if self.stops.len() < 2 {
            None
        } else {
            self.stops.last()
        }
    }

    /// true for the first and last stop of the tour.
    pub fn is_depot_stop(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.stops.len()
    }

    /// the polyline as a geo LineString in (lon, lat) order.
    pub fn line_string(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|[lat, lon]| geo::Coord { x: *lon, y: *lat })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.stops.len() < 2 {
            return Err(ModelError::MissingDepotStops {
                driver_id: self.driver_id,
                stops: self.stops.len(),
            });
        }
        Ok(())
    }
}
