use serde::{Deserialize, Serialize};

use crate::input::{self, InputError};

/// a `[latitude, longitude]` pair, the coordinate layout used by route
/// polylines and stops on the wire.
pub type Coordinate = [f64; 2];

/// a coordinate in the shape the routing service expects in requests.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> LatLng {
        LatLng {
            latitude,
            longitude,
        }
    }

    /// builds a LatLng after checking both values are finite and in range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<LatLng, InputError> {
        let latitude = input::validate_latitude(latitude)?;
        let longitude = input::validate_longitude(longitude)?;
        Ok(LatLng::new(latitude, longitude))
    }

    pub fn validate(&self) -> Result<(), InputError> {
        LatLng::try_new(self.latitude, self.longitude).map(|_| ())
    }

    pub fn as_coordinate(&self) -> Coordinate {
        [self.latitude, self.longitude]
    }
}

impl From<Coordinate> for LatLng {
    fn from(value: Coordinate) -> Self {
        LatLng::new(value[0], value[1])
    }
}

impl From<LatLng> for geo::Point<f64> {
    fn from(value: LatLng) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}
