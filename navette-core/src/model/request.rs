use serde::{Deserialize, Serialize};

use super::LatLng;
use crate::input::{self, InputError};

/// body of a `POST /optimize_route` call. built fresh for every optimization
/// and never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<LatLng>,
    pub delivery_points: Vec<LatLng>,
    pub vehicle_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_per_driver: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
}

impl OptimizationRequest {
    /// builds a request, rejecting any coordinate or parameter that the
    /// routing service could not make sense of.
    pub fn try_new(
        start_point: Option<LatLng>,
        delivery_points: Vec<LatLng>,
        vehicle_count: u32,
        capacity_per_driver: Option<u32>,
        max_distance_km: Option<f64>,
    ) -> Result<OptimizationRequest, InputError> {
        if let Some(start) = start_point.as_ref() {
            start.validate()?;
        }
        for point in delivery_points.iter() {
            point.validate()?;
        }
        if delivery_points.len() < input::MIN_DELIVERY_POINTS {
            return Err(InputError::TooFewDeliveryPoints {
                found: delivery_points.len(),
                required: input::MIN_DELIVERY_POINTS,
            });
        }
        let vehicle_count = input::validate_vehicle_count(vehicle_count)?;
        let capacity_per_driver = capacity_per_driver
            .map(input::validate_capacity)
            .transpose()?;
        let max_distance_km = max_distance_km
            .map(input::validate_max_distance_km)
            .transpose()?;
        Ok(OptimizationRequest {
            start_point,
            delivery_points,
            vehicle_count,
            capacity_per_driver,
            max_distance_km,
        })
    }
}

/// body of a `POST /optimize` call, which plans over the service's own
/// pickup points.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct FleetOptimizationRequest {
    pub num_drivers: u32,
    pub capacity_per_driver: u32,
    pub max_distance_km: f64,
}

impl Default for FleetOptimizationRequest {
    fn default() -> Self {
        Self {
            num_drivers: 3,
            capacity_per_driver: 8,
            max_distance_km: 15.0,
        }
    }
}

impl FleetOptimizationRequest {
    pub fn try_new(
        num_drivers: u32,
        capacity_per_driver: u32,
        max_distance_km: f64,
    ) -> Result<FleetOptimizationRequest, InputError> {
        Ok(FleetOptimizationRequest {
            num_drivers: input::validate_vehicle_count(num_drivers)?,
            capacity_per_driver: input::validate_capacity(capacity_per_driver)?,
            max_distance_km: input::validate_max_distance_km(max_distance_km)?,
        })
    }
}
