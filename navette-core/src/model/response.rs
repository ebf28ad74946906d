use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ModelError, Route};

/// result of an optimization call. `/optimize_route` only fills `routes`;
/// `/optimize` also reports fleet totals.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OptimizationResponse {
    pub routes: Vec<Route>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_passengers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl OptimizationResponse {
    /// every driver appears once and every route carries its depot stops.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::with_capacity(self.routes.len());
        for route in self.routes.iter() {
            if !seen.insert(route.driver_id) {
                return Err(ModelError::DuplicateDriver(route.driver_id));
            }
            route.validate()?;
        }
        Ok(())
    }

    pub fn route(&self, driver_id: u32) -> Option<&Route> {
        self.routes.iter().find(|r| r.driver_id == driver_id)
    }

    /// the driver whose route should be active: `requested` when a route
    /// carries it, otherwise the first route. `None` only when there are no
    /// routes.
    pub fn resolve_driver(&self, requested: Option<u32>) -> Option<u32> {
        requested
            .and_then(|driver_id| self.route(driver_id))
            .or_else(|| self.routes.first())
            .map(|r| r.driver_id)
    }

    pub fn driver_ids(&self) -> Vec<u32> {
        self.routes.iter().map(|r| r.driver_id).collect()
    }

    /// total number of pickups across all routes, depot stops excluded.
    pub fn intermediate_stop_count(&self) -> usize {
        self.routes.iter().map(Route::intermediate_stop_count).sum()
    }
}
