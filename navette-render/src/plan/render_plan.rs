use navette_core::model::{Coordinate, OptimizationResponse, Route};
use navette_core::util::Region;
use serde::{Deserialize, Serialize};

use super::{Palette, StopMarker};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Polyline {
    /// vertices in driving order, as (lat, lon)
    pub coordinates: Vec<Coordinate>,
    pub color: String,
}

/// everything drawn for one vehicle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteLayer {
    pub driver_id: u32,
    pub polyline: Polyline,
    pub markers: Vec<StopMarker>,
    pub distance: f64,
    pub load: u32,
    pub active: bool,
}

impl RouteLayer {
    fn new(route: &Route, palette: &Palette, active: bool) -> RouteLayer {
        RouteLayer {
            driver_id: route.driver_id,
            polyline: Polyline {
                coordinates: route.points.clone(),
                color: palette.color_for(route.driver_id).to_string(),
            },
            markers: StopMarker::for_route(route, palette),
            distance: route.distance,
            load: route.load,
            active,
        }
    }

    pub fn intermediate_stop_count(&self) -> usize {
        self.markers.iter().filter(|m| !m.is_depot()).count()
    }
}

/// a deterministic description of the map for one optimization result: one
/// layer per route in response order, at most one of them active.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub layers: Vec<RouteLayer>,
    pub active_driver: Option<u32>,
    /// viewport framing every polyline vertex and stop
    pub region: Option<Region>,
}

impl RenderPlan {
    /// builds the plan for `response`, activating `selected` when a route
    /// carries that driver and the first route otherwise.
    pub fn build(
        response: &OptimizationResponse,
        selected: Option<u32>,
        palette: &Palette,
    ) -> RenderPlan {
        let active_driver = response.resolve_driver(selected);
        let layers: Vec<RouteLayer> = response
            .routes
            .iter()
            .map(|route| RouteLayer::new(route, palette, Some(route.driver_id) == active_driver))
            .collect();
        let framed: Vec<Coordinate> = layers
            .iter()
            .flat_map(|layer| {
                layer
                    .polyline
                    .coordinates
                    .iter()
                    .copied()
                    .chain(layer.markers.iter().map(|m| m.coordinate))
            })
            .collect();
        let region = Region::fit(&framed);
        log::debug!(
            "render plan with {} layers, active driver {:?}",
            layers.len(),
            active_driver
        );
        RenderPlan {
            layers,
            active_driver,
            region,
        }
    }

    pub fn active_layer(&self) -> Option<&RouteLayer> {
        self.layers.iter().find(|l| l.active)
    }

    pub fn layer(&self, driver_id: u32) -> Option<&RouteLayer> {
        self.layers.iter().find(|l| l.driver_id == driver_id)
    }

    /// moves the active flag to `driver_id`, falling back to the first
    /// layer. returns the driver that ended up active.
    pub fn select(&mut self, driver_id: u32) -> Option<u32> {
        let active = self
            .layer(driver_id)
            .or_else(|| self.layers.first())
            .map(|l| l.driver_id);
        for layer in self.layers.iter_mut() {
            layer.active = Some(layer.driver_id) == active;
        }
        self.active_driver = active;
        active
    }
}
