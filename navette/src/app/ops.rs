//! the work behind each [`super::NavetteOperation`]. network calls run on a
//! current-thread tokio runtime created per operation.
use std::future::Future;
use std::path::Path;

use itertools::Itertools;
use navette_client::{client::RoutingService, session::OptimizationSession};
use navette_core::{
    input::{validate_max_distance_km, PointCollector},
    model::{FleetOptimizationRequest, LatLng, OptimizationResponse, Point},
    util::{geo_utils, Region},
};
use navette_render::{
    geojson::serialize_plan_as_geojson,
    plan::{Palette, RenderPlan},
    summary::{FleetStats, RouteSummary},
};

use super::{DepotConfig, NavetteAppError, NavetteConfig};
use crate::util::fs;

pub const RESPONSE_FILENAME: &str = "response.json";
pub const PLAN_FILENAME: &str = "plan.json";
pub const GEOJSON_FILENAME: &str = "routes.geojson";
pub const SUMMARY_FILENAME: &str = "summary.json";

/// `navette points`
pub fn points(config: &NavetteConfig, within_km: Option<f64>) -> Result<(), NavetteAppError> {
    let client = config.service.build()?;
    let all_points = block_on(client.points())??;
    let points = points_near_depot(all_points, within_km, &config.depot)?;
    for point in points.iter() {
        let distance = point
            .distance_to_depot_km
            .map(|d| format!(", {d:.2} km from depot"))
            .unwrap_or_default();
        println!(
            "{:>4}  {} ({}), {} passengers{distance}",
            point.id,
            point.name,
            point.lat_lng(),
            point.passengers
        );
    }
    Ok(())
}

/// keeps the points within `within_km` of the depot. without a radius the
/// depot is not consulted.
fn points_near_depot(
    points: Vec<Point>,
    within_km: Option<f64>,
    depot: &DepotConfig,
) -> Result<Vec<Point>, NavetteAppError> {
    let Some(radius) = within_km else {
        return Ok(points);
    };
    let radius = validate_max_distance_km(radius)?;
    let kept = geo_utils::within_radius(&points, &depot.lat_lng()?, radius);
    log::info!(
        "{} of {} points within {radius} km of {}",
        kept.len(),
        points.len(),
        depot.name
    );
    Ok(kept)
}

/// `navette optimize`
pub fn optimize(
    config: &NavetteConfig,
    request: &FleetOptimizationRequest,
    driver: Option<u32>,
    output_directory: Option<&Path>,
) -> Result<(), NavetteAppError> {
    let palette = config.render.build()?;
    let session = OptimizationSession::new(config.service.build()?);
    let (response, plan, stats) =
        block_on(optimize_fleet_with_stats(&session, request, driver, &palette))??;
    let mut summary = RouteSummary::new(&plan);
    if let Some(stats) = stats {
        summary = summary.with_stats(stats);
    }
    println!("{summary}");
    if let Some(map_url) = &response.map_url {
        println!("map: {map_url}");
    }
    match output_directory {
        Some(outdir) => write_outputs(outdir, Some(&response), &plan, &summary, &config.depot),
        None => Ok(()),
    }
}

/// `navette optimize-route`
pub fn optimize_route(
    config: &NavetteConfig,
    collector: &PointCollector,
    driver: Option<u32>,
    output_directory: Option<&Path>,
) -> Result<(), NavetteAppError> {
    let palette = config.render.build()?;
    let session = OptimizationSession::new(config.service.build()?);
    let (response, plan) = block_on(optimize_and_render(&session, collector, driver, &palette))??;
    let summary = RouteSummary::new(&plan);
    println!("{summary}");
    match output_directory {
        Some(outdir) => write_outputs(outdir, Some(&response), &plan, &summary, &config.depot),
        None => Ok(()),
    }
}

/// `navette routes`
pub fn routes(config: &NavetteConfig, id: Option<u64>) -> Result<(), NavetteAppError> {
    let client = config.service.build()?;
    let records = match id {
        Some(id) => block_on(client.routes_for(id))??,
        None => block_on(client.routes())??,
    };
    for driver in navette_core::model::route_record::group_by_driver(&records) {
        println!(
            "Driver {}: {} stops, {} passengers",
            driver.driver_id,
            driver.records.len(),
            driver.passengers()
        );
        for record in driver.records.iter() {
            let [lat, lon] = record.coordinate();
            println!(
                "  #{:<3} ({lat:.5}, {lon:.5}) {} passengers",
                record.stop_number, record.passengers
            );
        }
    }
    Ok(())
}

/// `navette driver`
pub fn driver(config: &NavetteConfig, driver_id: u32) -> Result<(), NavetteAppError> {
    let client = config.service.build()?;
    let stops = block_on(client.driver_route(driver_id))??;
    if stops.is_empty() {
        println!("Driver {driver_id}: no stops");
        return Ok(());
    }
    println!("Driver {driver_id}: {} stops", stops.len());
    for stop in stops.iter().sorted_by_key(|s| s.stop_number) {
        let arrival = stop.arrival_time.as_deref().unwrap_or("--:--");
        println!(
            "  #{:<3} {arrival}  {} ({}), {} passengers",
            stop.stop_number,
            stop.name,
            LatLng::new(stop.lat, stop.lon),
            stop.passengers
        );
    }
    Ok(())
}

/// `navette render`
pub fn render(
    config: &NavetteConfig,
    response_file: &Path,
    driver: Option<u32>,
    output_directory: Option<&Path>,
) -> Result<(), NavetteAppError> {
    let palette = config.render.build()?;
    let response: OptimizationResponse = fs::read_json(response_file)?;
    response.validate()?;
    let plan = RenderPlan::build(&response, driver, &palette);
    let summary = RouteSummary::new(&plan);
    println!("{summary}");
    match output_directory {
        Some(outdir) => write_outputs(outdir, None, &plan, &summary, &config.depot),
        None => Ok(()),
    }
}

pub fn fleet_request(
    num_drivers: u32,
    capacity_per_driver: u32,
    max_distance_km: f64,
) -> Result<FleetOptimizationRequest, NavetteAppError> {
    let request =
        FleetOptimizationRequest::try_new(num_drivers, capacity_per_driver, max_distance_km)?;
    Ok(request)
}

/// fills a collector the way the map screen would, one field at a time.
pub fn collect_points(
    start: Option<&LatLng>,
    points: &[LatLng],
    vehicle_count: &str,
    capacity: Option<&str>,
    max_distance_km: Option<&str>,
) -> Result<PointCollector, NavetteAppError> {
    let mut collector = PointCollector::new();
    if let Some(start) = start {
        collector.set_start_point(*start)?;
    }
    for point in points.iter() {
        let _ = collector.add_tap(*point)?;
    }
    collector.set_vehicle_count(vehicle_count)?;
    if let Some(capacity) = capacity {
        collector.set_capacity_per_driver(capacity)?;
    }
    if let Some(max_distance_km) = max_distance_km {
        collector.set_max_distance_km(max_distance_km)?;
    }
    if !collector.can_optimize() {
        log::warn!(
            "{} delivery points collected, optimization will be refused",
            collector.delivery_points().len()
        );
    }
    Ok(collector)
}

/// runs one `/optimize_route` call through `session` and renders its result.
pub async fn optimize_and_render<S: RoutingService>(
    session: &OptimizationSession<S>,
    collector: &PointCollector,
    driver: Option<u32>,
    palette: &Palette,
) -> Result<(OptimizationResponse, RenderPlan), NavetteAppError> {
    let response = session.optimize(collector).await?;
    Ok(render_selected(session, response, driver, palette))
}

/// runs one `/optimize` call through `session` and renders its result.
pub async fn optimize_fleet_and_render<S: RoutingService>(
    session: &OptimizationSession<S>,
    request: &FleetOptimizationRequest,
    driver: Option<u32>,
    palette: &Palette,
) -> Result<(OptimizationResponse, RenderPlan), NavetteAppError> {
    let response = session.optimize_fleet(request).await?;
    Ok(render_selected(session, response, driver, palette))
}

/// runs one `/optimize` call, then counts the service's pickup points for the
/// fleet stats. a failed count leaves the stats unset.
pub async fn optimize_fleet_with_stats<S: RoutingService>(
    session: &OptimizationSession<S>,
    request: &FleetOptimizationRequest,
    driver: Option<u32>,
    palette: &Palette,
) -> Result<(OptimizationResponse, RenderPlan, Option<FleetStats>), NavetteAppError> {
    let (response, plan) = optimize_fleet_and_render(session, request, driver, palette).await?;
    let stats = match session.load_points().await {
        Ok(points) => Some(FleetStats::new(points.len(), request)),
        Err(e) => {
            log::warn!("fleet stats omitted, pickup points unavailable: {e}");
            None
        }
    };
    Ok((response, plan, stats))
}

fn render_selected<S>(
    session: &OptimizationSession<S>,
    response: OptimizationResponse,
    driver: Option<u32>,
    palette: &Palette,
) -> (OptimizationResponse, RenderPlan) {
    if let Some(driver_id) = driver {
        let _ = session.select_driver(driver_id);
    }
    let plan = RenderPlan::build(&response, session.selected_driver(), palette);
    (response, plan)
}

/// writes the raw response (when there is one), the render plan, its GeoJSON
/// export and the summary to `output_directory`.
pub fn write_outputs(
    output_directory: &Path,
    response: Option<&OptimizationResponse>,
    plan: &RenderPlan,
    summary: &RouteSummary,
    depot: &DepotConfig,
) -> Result<(), NavetteAppError> {
    fs::create_dirs(output_directory)?;
    if let Some(response) = response {
        fs::write_json(response, output_directory, RESPONSE_FILENAME)?;
    }
    let mut plan = plan.clone();
    plan.region = Some(framing(plan.region, depot)?);
    fs::write_json(&plan, output_directory, PLAN_FILENAME)?;
    let writer = fs::create_writer(output_directory, GEOJSON_FILENAME)?;
    serialize_plan_as_geojson(writer, &plan)?;
    fs::write_json(summary, output_directory, SUMMARY_FILENAME)?;
    log::info!(
        "wrote {} route layers to {}",
        plan.layers.len(),
        output_directory.display()
    );
    Ok(())
}

/// the fitted region, or the default framing around the depot.
fn framing(fitted: Option<Region>, depot: &DepotConfig) -> Result<Region, NavetteAppError> {
    match fitted {
        Some(region) => Ok(region),
        None => Ok(Region::around(&depot.lat_lng()?)),
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output, NavetteAppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            NavetteAppError::TokioError(format!("failure creating async rust tokio runtime: {e}"))
        })?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod test {
    use super::*;
    use navette_client::{client::ClientError, session::SessionError};
    use navette_core::{
        input::InputError,
        model::{DriverStop, OptimizationRequest, RouteRecord},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// answers every optimization with the same body, recording the requests.
    struct CannedService {
        body: &'static str,
        calls: AtomicUsize,
        delivery_points: std::sync::Mutex<Vec<usize>>,
        endpoints: std::sync::Mutex<Vec<&'static str>>,
        points: Option<usize>,
    }

    impl CannedService {
        fn new(body: &'static str) -> CannedService {
            CannedService {
                body,
                calls: AtomicUsize::new(0),
                delivery_points: std::sync::Mutex::new(vec![]),
                endpoints: std::sync::Mutex::new(vec![]),
                points: Some(0),
            }
        }

        /// `None` makes `/points` fail with HTTP 500.
        fn with_points(mut self, points: Option<usize>) -> CannedService {
            self.points = points;
            self
        }

        fn visit(&self, endpoint: &'static str) {
            self.endpoints
                .lock()
                .expect("test invariant failed: poisoned")
                .push(endpoint);
        }

        fn endpoints(&self) -> Vec<&'static str> {
            self.endpoints
                .lock()
                .expect("test invariant failed: poisoned")
                .clone()
        }

        fn answer(&self) -> Result<OptimizationResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            serde_json::from_str(self.body).map_err(|e| ClientError::Decode {
                url: String::from("canned"),
                message: e.to_string(),
            })
        }
    }

    impl RoutingService for CannedService {
        async fn optimize_route(
            &self,
            request: &OptimizationRequest,
        ) -> Result<OptimizationResponse, ClientError> {
            self.visit("/optimize_route");
            self.delivery_points
                .lock()
                .expect("test invariant failed: poisoned")
                .push(request.delivery_points.len());
            self.answer()
        }

        async fn optimize(
            &self,
            _request: &FleetOptimizationRequest,
        ) -> Result<OptimizationResponse, ClientError> {
            self.visit("/optimize");
            self.answer()
        }

        async fn points(&self) -> Result<Vec<Point>, ClientError> {
            self.visit("/points");
            match self.points {
                Some(count) => Ok((0..count as u64)
                    .map(|id| Point {
                        id,
                        name: format!("pickup {id}"),
                        lat: 48.45,
                        lon: -2.04,
                        passengers: 1,
                        poi_type: None,
                        distance_to_depot_km: None,
                        arrival_time: None,
                    })
                    .collect()),
                None => Err(ClientError::Status {
                    url: String::from("canned/points"),
                    status: 500,
                    body: String::from("{}"),
                }),
            }
        }

        async fn routes(&self, _id: Option<u64>) -> Result<Vec<RouteRecord>, ClientError> {
            Ok(vec![])
        }

        async fn driver_route(&self, _driver_id: u32) -> Result<Vec<DriverStop>, ClientError> {
            Ok(vec![])
        }
    }

    const SINGLE_ROUTE: &str = r#"{"routes": [{
        "driver_id": 0,
        "points": [[48.45, -2.04]],
        "stops": [
            {"name": "Château de Dinan", "coords": [48.450387, -2.044774]},
            {"name": "Château de Dinan", "coords": [48.450387, -2.044774]}
        ],
        "distance": 3.2,
        "load": 2
    }]}"#;

    fn example_collector() -> PointCollector {
        collect_points(
            None,
            &[LatLng::new(48.46, -2.03), LatLng::new(48.44, -2.05)],
            "2",
            None,
            None,
        )
        .expect("test invariant failed: example points should be valid")
    }

    #[tokio::test]
    async fn test_single_route_renders_one_polyline_in_first_color() {
        let session = OptimizationSession::new(CannedService::new(SINGLE_ROUTE));
        let palette = Palette::default();
        let (response, plan) = optimize_and_render(&session, &example_collector(), None, &palette)
            .await
            .expect("test invariant failed: optimization should succeed");
        assert_eq!(response.routes.len(), 1);
        assert_eq!(plan.layers.len(), 1);
        let layer = &plan.layers[0];
        assert_eq!(layer.polyline.coordinates, vec![[48.45, -2.04]]);
        assert_eq!(layer.polyline.color, palette.colors()[0]);
        assert!(layer.active);
        assert_eq!(layer.distance, 3.2);
        assert_eq!(layer.load, 2);
        let sent = session
            .service()
            .delivery_points
            .lock()
            .expect("test invariant failed: poisoned")
            .clone();
        assert_eq!(sent, vec![2]);
    }

    #[tokio::test]
    async fn test_one_point_never_reaches_service() {
        let session = OptimizationSession::new(CannedService::new(SINGLE_ROUTE));
        let collector = collect_points(None, &[LatLng::new(48.46, -2.03)], "2", None, None)
            .expect("test invariant failed: collector should build");
        let result =
            optimize_and_render(&session, &collector, None, &Palette::default()).await;
        assert!(matches!(
            result,
            Err(NavetteAppError::Session(SessionError::Input(
                InputError::TooFewDeliveryPoints { found: 1, .. }
            )))
        ));
        assert_eq!(session.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requested_driver_is_active() {
        let body = r#"{"routes": [
            {"driver_id": 0, "points": [], "stops": [
                {"name": "depot", "coords": [48.45, -2.04]},
                {"name": "depot", "coords": [48.45, -2.04]}]},
            {"driver_id": 1, "points": [], "stops": [
                {"name": "depot", "coords": [48.45, -2.04]},
                {"name": "depot", "coords": [48.45, -2.04]}]}
        ]}"#;
        let session = OptimizationSession::new(CannedService::new(body));
        let (_, plan) = optimize_fleet_and_render(
            &session,
            &FleetOptimizationRequest::default(),
            Some(1),
            &Palette::default(),
        )
        .await
        .expect("test invariant failed: optimization should succeed");
        assert_eq!(plan.active_driver, Some(1));
        assert_eq!(session.selected_driver(), Some(1));
    }

    #[tokio::test]
    async fn test_fleet_optimization_counts_points_afterwards() {
        let session = OptimizationSession::new(CannedService::new(SINGLE_ROUTE).with_points(Some(3)));
        let request = FleetOptimizationRequest::default();
        let (response, plan, stats) =
            optimize_fleet_with_stats(&session, &request, None, &Palette::default())
                .await
                .expect("test invariant failed: optimization should succeed");
        assert_eq!(response.routes.len(), 1);
        assert_eq!(plan.layers.len(), 1);
        assert_eq!(stats, Some(FleetStats::new(3, &request)));
        assert_eq!(session.service().endpoints(), vec!["/optimize", "/points"]);
    }

    #[tokio::test]
    async fn test_fleet_optimization_survives_points_failure() {
        let session = OptimizationSession::new(CannedService::new(SINGLE_ROUTE).with_points(None));
        let (response, plan, stats) = optimize_fleet_with_stats(
            &session,
            &FleetOptimizationRequest::default(),
            None,
            &Palette::default(),
        )
        .await
        .expect("test invariant failed: a failed point count should not fail the optimization");
        assert_eq!(response.routes.len(), 1);
        assert_eq!(plan.active_driver, Some(0));
        assert_eq!(stats, None);
        assert_eq!(session.service().endpoints(), vec!["/optimize", "/points"]);
        assert_eq!(session.response(), Some(response));
    }

    #[test]
    fn test_points_near_depot() {
        let point = |id: u64, lat: f64, lon: f64| Point {
            id,
            name: format!("pickup {id}"),
            lat,
            lon,
            passengers: 1,
            poi_type: None,
            distance_to_depot_km: None,
            arrival_time: None,
        };
        let points = vec![point(1, 48.46, -2.03), point(2, 48.80, -2.50)];
        let depot = DepotConfig::default();
        let kept = points_near_depot(points.clone(), Some(5.0), &depot)
            .expect("test invariant failed: filter should succeed");
        assert_eq!(kept.iter().map(|p| p.id).collect_vec(), vec![1]);

        let broken_depot = DepotConfig {
            latitude: 123.0,
            ..DepotConfig::default()
        };
        let all = points_near_depot(points.clone(), None, &broken_depot)
            .expect("test invariant failed: no radius should not read the depot");
        assert_eq!(all, points);
        let result = points_near_depot(points, Some(5.0), &broken_depot);
        assert!(matches!(result, Err(NavetteAppError::Input(_))));
    }

    #[test]
    fn test_collect_points_rejects_bad_fields() {
        let points = [LatLng::new(48.46, -2.03), LatLng::new(48.44, -2.05)];
        let result = collect_points(None, &points, "0", None, None);
        assert!(matches!(result, Err(NavetteAppError::Input(_))));
        let result = collect_points(None, &points, "2", Some("lots"), None);
        assert!(matches!(result, Err(NavetteAppError::Input(_))));
        let result = collect_points(None, &points, "2", None, Some("-5"));
        assert!(matches!(result, Err(NavetteAppError::Input(_))));
    }

    #[test]
    fn test_fleet_request_validated() {
        assert!(fleet_request(3, 8, 15.0).is_ok());
        assert!(matches!(
            fleet_request(0, 8, 15.0),
            Err(NavetteAppError::Input(_))
        ));
    }

    #[test]
    fn test_render_saved_response_writes_outputs() {
        let dir = std::env::temp_dir().join(format!("navette-render-test-{}", std::process::id()));
        fs::create_dirs(&dir).expect("test invariant failed: scratch dir");
        let response_file = dir.join("saved.json");
        std::fs::write(&response_file, SINGLE_ROUTE)
            .expect("test invariant failed: could not write saved response");
        let outdir = dir.join("out");
        render(&NavetteConfig::default(), &response_file, Some(0), Some(&outdir))
            .expect("test invariant failed: render should succeed");
        for filename in [PLAN_FILENAME, GEOJSON_FILENAME, SUMMARY_FILENAME] {
            assert!(outdir.join(filename).is_file(), "missing {filename}");
        }
        assert!(!outdir.join(RESPONSE_FILENAME).exists());
        let plan: RenderPlan =
            fs::read_json(&outdir.join(PLAN_FILENAME)).expect("test invariant failed: plan");
        assert!(plan.region.is_some());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_render_rejects_invalid_saved_response() {
        let dir =
            std::env::temp_dir().join(format!("navette-render-invalid-{}", std::process::id()));
        fs::create_dirs(&dir).expect("test invariant failed: scratch dir");
        let response_file = dir.join("saved.json");
        std::fs::write(
            &response_file,
            r#"{"routes": [{"driver_id": 0, "points": [], "stops": []}]}"#,
        )
        .expect("test invariant failed: could not write saved response");
        let result = render(&NavetteConfig::default(), &response_file, None, None);
        assert!(matches!(result, Err(NavetteAppError::Model(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
