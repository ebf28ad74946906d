use indexmap::IndexMap;
use navette_core::model::FleetOptimizationRequest;
use serde::{Deserialize, Serialize};

use crate::plan::RenderPlan;

/// summarizes an optimization result for display and for writing next to
/// the exported GeoJSON.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteSummary {
    /// date and time this summary was created
    pub created: String,
    /// per-driver details, keyed by driver id, in route order
    pub drivers: IndexMap<u32, DriverSummary>,
    pub totals: RouteTotals,
    /// fleet parameters the plan was requested with, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<FleetStats>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DriverSummary {
    /// pickups visited, depot stops excluded
    pub stops: usize,
    pub distance_km: f64,
    pub passengers: u32,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct RouteTotals {
    pub routes: usize,
    pub stops: usize,
    pub distance_km: f64,
    pub passengers: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FleetStats {
    pub total_points: usize,
    pub max_distance_km: f64,
    pub num_drivers: u32,
    pub capacity_per_driver: u32,
}

impl FleetStats {
    pub fn new(total_points: usize, request: &FleetOptimizationRequest) -> FleetStats {
        FleetStats {
            total_points,
            max_distance_km: request.max_distance_km,
            num_drivers: request.num_drivers,
            capacity_per_driver: request.capacity_per_driver,
        }
    }
}

impl RouteSummary {
    pub fn new(plan: &RenderPlan) -> RouteSummary {
        let created = chrono::Utc::now().to_rfc3339();
        let mut drivers = IndexMap::new();
        for layer in plan.layers.iter() {
            let summary = DriverSummary {
                stops: layer.intermediate_stop_count(),
                distance_km: layer.distance,
                passengers: layer.load,
                active: layer.active,
            };
            let _ = drivers.insert(layer.driver_id, summary);
        }
        let totals = RouteTotals {
            routes: drivers.len(),
            stops: drivers.values().map(|d| d.stops).sum(),
            distance_km: drivers.values().map(|d| d.distance_km).sum(),
            passengers: drivers.values().map(|d| d.passengers).sum(),
        };
        RouteSummary {
            created,
            drivers,
            totals,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: FleetStats) -> RouteSummary {
        self.stats = Some(stats);
        self
    }

    /// one human-readable line per driver.
    pub fn driver_lines(&self) -> Vec<String> {
        self.drivers
            .iter()
            .map(|(driver_id, d)| {
                let marker = if d.active { " *" } else { "" };
                format!(
                    "Driver {driver_id}: {} stops, {:.2} km, {} passengers{marker}",
                    d.stops, d.distance_km, d.passengers
                )
            })
            .collect()
    }
}

impl std::fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.driver_lines() {
            writeln!(f, "{line}")?;
        }
        write!(
            f,
            "Total: {} routes, {} stops, {:.2} km, {} passengers",
            self.totals.routes, self.totals.stops, self.totals.distance_km, self.totals.passengers
        )?;
        if let Some(stats) = &self.stats {
            write!(
                f,
                "\nFleet: {} points, {} drivers, capacity {}, max {:.1} km",
                stats.total_points, stats.num_drivers, stats.capacity_per_driver, stats.max_distance_km
            )?;
        }
        Ok(())
    }
}
