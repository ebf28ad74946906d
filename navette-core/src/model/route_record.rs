//! flat route rows as stored by the routing service. unlike [`super::Route`],
//! these carry one row per stop and must be regrouped before display.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// a row of `GET /routes` or `GET /routes/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteRecord {
    pub id: u64,
    pub driver_id: u32,
    pub stop_number: u32,
    pub lat: f64,
    pub lon: f64,
    pub passengers: u32,
}

/// a row of `GET /driver/{id}`, one pickup of an optimized route.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DriverStop {
    pub driver_id: u32,
    pub stop_number: u32,
    pub point_id: u64,
    pub name: String,
    #[serde(default)]
    pub poi_type: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub passengers: u32,
    #[serde(default, rename = "distance_to_chateau")]
    pub distance_to_depot_km: Option<f64>,
    #[serde(default)]
    pub arrival_time: Option<String>,
}

/// all rows of a single driver in stop order.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DriverRecords {
    pub driver_id: u32,
    pub records: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn coordinate(&self) -> Coordinate {
        [self.lat, self.lon]
    }
}

impl DriverRecords {
    pub fn passengers(&self) -> u32 {
        self.records.iter().map(|r| r.passengers).sum()
    }
}

/// groups route rows by driver, ordering drivers by id and each driver's rows
/// by stop number.
pub fn group_by_driver(records: &[RouteRecord]) -> Vec<DriverRecords> {
    let sorted = records
        .iter()
        .cloned()
        .sorted_by_key(|r| (r.driver_id, r.stop_number))
        .collect_vec();
    let chunks = sorted.into_iter().chunk_by(|r| r.driver_id);
    let mut result = vec![];
    for (driver_id, grouped) in &chunks {
        result.push(DriverRecords {
            driver_id,
            records: grouped.collect(),
        });
    }
    result
}
