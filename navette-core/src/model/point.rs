use serde::{Deserialize, Serialize};

use super::{Coordinate, LatLng};

/// a pickup location served by the routing service's `/points` endpoint.
/// points are never modified after they are fetched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Point {
    pub id: u64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// number of passengers waiting at this location
    pub passengers: u32,
    /// OSM category of the location, when the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi_type: Option<String>,
    /// great-circle distance to the depot in kilometers
    #[serde(
        default,
        rename = "distance_to_chateau",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_to_depot_km: Option<f64>,
    /// expected arrival time at the pickup, formatted as HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl Point {
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    pub fn coordinate(&self) -> Coordinate {
        [self.lat, self.lon]
    }
}
