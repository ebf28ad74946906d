use geo::{BoundingRect, MultiPoint};
use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, LatLng};

/// smallest span a fitted region may have, in degrees.
const MIN_DELTA: f64 = 0.01;
/// span used when framing a single location.
const DEFAULT_DELTA: f64 = 0.1;
/// extra room around fitted coordinates so markers are not drawn on the edge.
const PADDING: f64 = 1.2;

/// a map viewport: a center plus the latitude and longitude spans.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// default framing around a single location.
    pub fn around(center: &LatLng) -> Region {
        Region {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    /// frames all coordinates with some padding. returns None when there is
    /// nothing to frame.
    pub fn fit(coordinates: &[Coordinate]) -> Option<Region> {
        let multi_point: MultiPoint<f64> = coordinates
            .iter()
            .map(|[lat, lon]| geo::Point::new(*lon, *lat))
            .collect();
        let rect = multi_point.bounding_rect()?;
        let center = rect.center();
        Some(Region {
            latitude: center.y,
            longitude: center.x,
            latitude_delta: (rect.height() * PADDING).max(MIN_DELTA),
            longitude_delta: (rect.width() * PADDING).max(MIN_DELTA),
        })
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let [lat, lon] = coordinate;
        (lat - self.latitude).abs() <= self.latitude_delta / 2.0
            && (lon - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}
