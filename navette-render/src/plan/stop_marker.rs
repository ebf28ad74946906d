use navette_core::model::{Coordinate, Route};
use serde::{Deserialize, Serialize};

use super::Palette;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// departure from or return to the depot
    Depot,
    Stop,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StopMarker {
    pub kind: MarkerKind,
    pub coordinate: Coordinate,
    pub color: String,
    /// "depot" for depot markers, the visit sequence number otherwise
    pub label: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
}

pub const DEPOT_LABEL: &str = "depot";

impl StopMarker {
    /// one marker per stop of `route`, in visit order. the first and last
    /// stops are depot markers.
    pub fn for_route(route: &Route, palette: &Palette) -> Vec<StopMarker> {
        let route_color = palette.color_for(route.driver_id);
        route
            .stops
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                let (kind, color, label) = if route.is_depot_stop(index) {
                    (MarkerKind::Depot, palette.depot_color(), DEPOT_LABEL.to_string())
                } else {
                    (MarkerKind::Stop, route_color, index.to_string())
                };
                StopMarker {
                    kind,
                    coordinate: stop.coords,
                    color: color.to_string(),
                    label,
                    name: stop.name.clone(),
                    passengers: stop.passengers,
                }
            })
            .collect()
    }

    pub fn is_depot(&self) -> bool {
        self.kind == MarkerKind::Depot
    }
}
