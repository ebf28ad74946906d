use std::collections::HashMap;
use std::io::Write;

use navette_core::model::Coordinate;
use serde::Serialize;

use crate::plan::{RenderError, RenderPlan, RouteLayer, StopMarker};

const DEPOT_SYMBOL: &str = "warehouse";
const STROKE_WIDTH: &str = "3";
const MARKER_SIZE: &str = "medium";

/// GeoJSON geometry. coordinates are (lon, lat).
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: (f64, f64) },
    LineString { coordinates: Vec<(f64, f64)> },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: HashMap<String, String>,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// writes `plan` as a pretty-printed GeoJSON feature collection styled with
/// simplestyle properties.
pub fn serialize_plan_as_geojson<W: Write>(writer: W, plan: &RenderPlan) -> Result<(), RenderError> {
    let collection = create_feature_collection(plan);
    serde_json::to_writer_pretty(writer, &collection).map_err(|e| RenderError::GeoJson(e.to_string()))
}

/// one LineString per route followed by one Point per stop marker.
pub fn create_feature_collection(plan: &RenderPlan) -> FeatureCollection {
    let lines = plan.layers.iter().map(get_route_line);
    let markers = plan
        .layers
        .iter()
        .flat_map(|layer| layer.markers.iter().map(move |m| get_stop_point(layer, m)));
    FeatureCollection {
        features: lines.chain(markers).collect(),
    }
}

fn get_route_line(layer: &RouteLayer) -> Feature {
    Feature {
        properties: slice_to_map(&[
            ("stroke", layer.polyline.color.as_str()),
            ("stroke-width", STROKE_WIDTH),
            ("driver_id", layer.driver_id.to_string().as_str()),
            ("distance", format!("{:.2}", layer.distance).as_str()),
            ("load", layer.load.to_string().as_str()),
            ("active", layer.active.to_string().as_str()),
        ]),
        geometry: Geometry::LineString {
            coordinates: layer.polyline.coordinates.iter().map(get_lng_lat).collect(),
        },
    }
}

fn get_stop_point(layer: &RouteLayer, marker: &StopMarker) -> Feature {
    let symbol = if marker.is_depot() {
        DEPOT_SYMBOL
    } else {
        marker.label.as_str()
    };
    let passengers = marker.passengers.map(|p| p.to_string()).unwrap_or_default();
    Feature {
        properties: slice_to_map(&[
            ("marker-color", marker.color.as_str()),
            ("marker-size", MARKER_SIZE),
            ("marker-symbol", symbol),
            ("driver_id", layer.driver_id.to_string().as_str()),
            ("name", marker.name.as_str()),
            ("passengers", passengers.as_str()),
        ]),
        geometry: Geometry::Point {
            coordinates: get_lng_lat(&marker.coordinate),
        },
    }
}

fn get_lng_lat(coordinate: &Coordinate) -> (f64, f64) {
    let [lat, lon] = coordinate;
    (*lon, *lat)
}

fn slice_to_map(vec: &[(&str, &str)]) -> HashMap<String, String> {
    vec.iter()
        .map(|&(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
