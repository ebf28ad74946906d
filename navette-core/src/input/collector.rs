use serde::{Deserialize, Serialize};

use super::{parse_ops, InputError, DEFAULT_VEHICLE_COUNT, MIN_DELIVERY_POINTS};
use crate::model::{LatLng, OptimizationRequest};

/// gathers the depot and delivery coordinates for one optimization, either
/// from map taps or from text fields, along with the fleet parameters.
///
/// the collector only ever holds validated values: text input is parsed on
/// entry and rejected if it is not a usable coordinate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointCollector {
    start_point: Option<LatLng>,
    delivery_points: Vec<LatLng>,
    vehicle_count: u32,
    capacity_per_driver: Option<u32>,
    max_distance_km: Option<f64>,
}

impl Default for PointCollector {
    fn default() -> Self {
        Self {
            start_point: None,
            delivery_points: vec![],
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            capacity_per_driver: None,
            max_distance_km: None,
        }
    }
}

impl PointCollector {
    pub fn new() -> PointCollector {
        PointCollector::default()
    }

    pub fn start_point(&self) -> Option<&LatLng> {
        self.start_point.as_ref()
    }

    pub fn delivery_points(&self) -> &[LatLng] {
        &self.delivery_points
    }

    pub fn vehicle_count(&self) -> u32 {
        self.vehicle_count
    }

    pub fn set_start_point(&mut self, start_point: LatLng) -> Result<(), InputError> {
        start_point.validate()?;
        self.start_point = Some(start_point);
        Ok(())
    }

    pub fn set_start_point_text(&mut self, latitude: &str, longitude: &str) -> Result<(), InputError> {
        let start_point = parse_ops::parse_lat_lng(latitude, longitude)?;
        self.start_point = Some(start_point);
        Ok(())
    }

    pub fn clear_start_point(&mut self) {
        self.start_point = None;
    }

    /// appends the coordinate of a map tap.
    pub fn add_tap(&mut self, coordinate: LatLng) -> Result<usize, InputError> {
        coordinate.validate()?;
        self.delivery_points.push(coordinate);
        Ok(self.delivery_points.len())
    }

    /// appends a coordinate typed into the latitude and longitude fields.
    pub fn add_text(&mut self, latitude: &str, longitude: &str) -> Result<usize, InputError> {
        let coordinate = parse_ops::parse_lat_lng(latitude, longitude)?;
        self.delivery_points.push(coordinate);
        Ok(self.delivery_points.len())
    }

    pub fn remove(&mut self, index: usize) -> Result<LatLng, InputError> {
        if index >= self.delivery_points.len() {
            return Err(InputError::NoSuchPoint {
                index,
                len: self.delivery_points.len(),
            });
        }
        Ok(self.delivery_points.remove(index))
    }

    pub fn clear(&mut self) {
        self.delivery_points.clear();
    }

    pub fn set_vehicle_count(&mut self, text: &str) -> Result<(), InputError> {
        self.vehicle_count = parse_ops::parse_vehicle_count(text)?;
        Ok(())
    }

    /// sets or, with empty text, clears the per-driver capacity.
    pub fn set_capacity_per_driver(&mut self, text: &str) -> Result<(), InputError> {
        self.capacity_per_driver = if text.trim().is_empty() {
            None
        } else {
            Some(parse_ops::parse_capacity(text)?)
        };
        Ok(())
    }

    /// sets or, with empty text, clears the maximum tour distance.
    pub fn set_max_distance_km(&mut self, text: &str) -> Result<(), InputError> {
        self.max_distance_km = if text.trim().is_empty() {
            None
        } else {
            Some(parse_ops::parse_max_distance_km(text)?)
        };
        Ok(())
    }

    /// whether the optimize action should be enabled.
    pub fn can_optimize(&self) -> bool {
        self.delivery_points.len() >= MIN_DELIVERY_POINTS
    }

    pub fn build_request(&self) -> Result<OptimizationRequest, InputError> {
        OptimizationRequest::try_new(
            self.start_point,
            self.delivery_points.clone(),
            self.vehicle_count,
            self.capacity_per_driver,
            self.max_distance_km,
        )
    }
}
