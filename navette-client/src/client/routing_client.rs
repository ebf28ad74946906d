use super::{ClientError, Endpoint};
use navette_core::model::{
    DriverStop, FleetOptimizationRequest, OptimizationRequest, OptimizationResponse, Point,
    RouteRecord,
};
use serde::{de::DeserializeOwned, Serialize};

/// HTTP client for the routing service. every method issues exactly one
/// request; there is no retry and no caching.
#[derive(Clone, Debug)]
pub struct RoutingServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoutingServiceClient {
    /// wraps an already configured reqwest client. `base_url` must not end
    /// with a slash, see [`super::RoutingServiceConfig::build`].
    pub fn new(http: reqwest::Client, base_url: String) -> RoutingServiceClient {
        RoutingServiceClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// `POST /optimize_route`. the response is checked before it is returned.
    pub async fn optimize_route(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse, ClientError> {
        log::info!(
            "requesting route optimization for {} delivery points with {} vehicles",
            request.delivery_points.len(),
            request.vehicle_count
        );
        let url = self.url(&Endpoint::OptimizeRoute);
        let response: OptimizationResponse = self.post_json(&url, request).await?;
        validated(url, response)
    }

    /// `POST /optimize`, planning over the pickup points stored by the service.
    pub async fn optimize(
        &self,
        request: &FleetOptimizationRequest,
    ) -> Result<OptimizationResponse, ClientError> {
        log::info!(
            "requesting fleet optimization for {} drivers, capacity {}, max distance {} km",
            request.num_drivers,
            request.capacity_per_driver,
            request.max_distance_km
        );
        let url = self.url(&Endpoint::Optimize);
        let response: OptimizationResponse = self.post_json(&url, request).await?;
        validated(url, response)
    }

    /// `GET /points`
    pub async fn points(&self) -> Result<Vec<Point>, ClientError> {
        let url = self.url(&Endpoint::Points);
        let points: Vec<Point> = self.get_json(&url).await?;
        log::info!("received {} pickup points", points.len());
        Ok(points)
    }

    /// `GET /routes`
    pub async fn routes(&self) -> Result<Vec<RouteRecord>, ClientError> {
        let url = self.url(&Endpoint::Routes);
        let records: Vec<RouteRecord> = self.get_json(&url).await?;
        log::info!("received {} stored route rows", records.len());
        Ok(records)
    }

    /// `GET /routes/{id}`
    pub async fn routes_for(&self, id: u64) -> Result<Vec<RouteRecord>, ClientError> {
        let url = self.url(&Endpoint::RoutesById(id));
        let records: Vec<RouteRecord> = self.get_json(&url).await?;
        log::info!("received {} stored route rows for id {id}", records.len());
        Ok(records)
    }

    /// `GET /driver/{id}`
    pub async fn driver_route(&self, driver_id: u32) -> Result<Vec<DriverStop>, ClientError> {
        let url = self.url(&Endpoint::Driver(driver_id));
        let stops: Vec<DriverStop> = self.get_json(&url).await?;
        log::info!("received {} stops for driver {driver_id}", stops.len());
        Ok(stops)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e))?;
        decode(url, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ClientError::Encode {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                } else {
                    ClientError::from_reqwest(url, e)
                }
            })?;
        decode(url, response).await
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::from_reqwest(url, e))?;
    log::debug!("{url} answered HTTP {} ({} bytes)", status.as_u16(), body.len());
    if !status.is_success() {
        return Err(ClientError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn validated(
    url: String,
    response: OptimizationResponse,
) -> Result<OptimizationResponse, ClientError> {
    response
        .validate()
        .map_err(|source| ClientError::InvalidResponse {
            url: url.clone(),
            source,
        })?;
    log::info!(
        "received {} routes with {} pickups from {url}",
        response.routes.len(),
        response.intermediate_stop_count()
    );
    Ok(response)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::RoutingServiceConfig;
    use crate::test_server::{Reply, StubServer};
    use navette_core::model::{LatLng, ModelError};
    use std::collections::HashMap;

    fn client_for(server: &StubServer) -> RoutingServiceClient {
        RoutingServiceConfig::new(&server.base_url)
            .build()
            .expect("test invariant failed: stub base url should be valid")
    }

    fn request() -> OptimizationRequest {
        OptimizationRequest::try_new(
            Some(LatLng::new(48.450387, -2.044774)),
            vec![
                LatLng::new(48.46, -2.03),
                LatLng::new(48.44, -2.05),
                LatLng::new(48.47, -2.01),
            ],
            2,
            None,
            None,
        )
        .expect("test invariant failed: request should be valid")
    }

    const ONE_ROUTE: &str = r#"{"routes": [{
        "driver_id": 0,
        "points": [[48.450387, -2.044774], [48.45, -2.04], [48.450387, -2.044774]],
        "stops": [
            {"name": "Depot", "coords": [48.450387, -2.044774]},
            {"name": "Stop 1", "coords": [48.45, -2.04], "passengers": 2},
            {"name": "Depot", "coords": [48.450387, -2.044774]}
        ],
        "distance": 3.2,
        "load": 2
    }]}"#;

    #[test]
    fn test_url_with_path_prefix() {
        let client = RoutingServiceConfig::new("http://localhost:5000/api/")
            .build()
            .expect("test invariant failed: url should be valid");
        assert_eq!(
            client.url(&Endpoint::Driver(3)),
            "http://localhost:5000/api/driver/3"
        );
        assert_eq!(
            client.url(&Endpoint::RoutesById(12)),
            "http://localhost:5000/api/routes/12"
        );
    }

    #[tokio::test]
    async fn test_echo_keeps_point_count_and_order() {
        let server = StubServer::start(Reply::Echo).await;
        let client = client_for(&server);
        let sent = request();
        let url = client.url(&Endpoint::OptimizeRoute);
        let echoed: OptimizationRequest = client
            .post_json(&url, &sent)
            .await
            .expect("test invariant failed: echo should decode");
        assert_eq!(echoed.delivery_points.len(), sent.delivery_points.len());
        assert_eq!(echoed.delivery_points, sent.delivery_points);
        assert_eq!(echoed, sent);

        let recorded = server.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].path, "/optimize_route");
        assert_eq!(recorded[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_unencodable_body_never_sent() {
        let server = StubServer::start(Reply::Echo).await;
        let client = client_for(&server);
        let mut body: HashMap<(u8, u8), u8> = HashMap::new();
        body.insert((1, 2), 3);
        let url = client.url(&Endpoint::Optimize);
        let result: Result<serde_json::Value, ClientError> = client.post_json(&url, &body).await;
        assert!(matches!(result, Err(ClientError::Encode { .. })));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_route_decodes_routes_only_body() {
        let server = StubServer::start(Reply::json(200, ONE_ROUTE)).await;
        let client = client_for(&server);
        let response = client
            .optimize_route(&request())
            .await
            .expect("test invariant failed: response should decode");
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].driver_id, 0);
        assert_eq!(response.routes[0].load, 2);
        assert_eq!(response.total_distance, 0.0);
        assert_eq!(response.total_passengers, 0);
    }

    #[tokio::test]
    async fn test_status_error_keeps_code_and_body() {
        let server =
            StubServer::start(Reply::json(500, r#"{"error": "solver unavailable"}"#)).await;
        let client = client_for(&server);
        let result = client.optimize_route(&request()).await;
        match result {
            Err(ClientError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert!(body.contains("solver unavailable"));
            }
            other => panic!("expected status error, found {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = StubServer::start(Reply::json(200, "<html>not json</html>")).await;
        let client = client_for(&server);
        let result = client.points().await;
        assert!(matches!(result, Err(ClientError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_driver_rejected() {
        let body = r#"{"routes": [
            {"driver_id": 1, "points": [], "stops": [
                {"name": "Depot", "coords": [48.45, -2.04]},
                {"name": "Depot", "coords": [48.45, -2.04]}]},
            {"driver_id": 1, "points": [], "stops": [
                {"name": "Depot", "coords": [48.45, -2.04]},
                {"name": "Depot", "coords": [48.45, -2.04]}]}
        ]}"#;
        let server = StubServer::start(Reply::json(200, body)).await;
        let client = client_for(&server);
        let result = client.optimize(&FleetOptimizationRequest::default()).await;
        match result {
            Err(ClientError::InvalidResponse { source, .. }) => {
                assert_eq!(source, ModelError::DuplicateDriver(1));
            }
            other => panic!("expected invalid response, found {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let url = crate::test_server::unused_base_url().await;
        let client = RoutingServiceConfig::new(&url)
            .build()
            .expect("test invariant failed: url should be valid");
        let result = client.points().await;
        assert!(matches!(result, Err(ClientError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_get_paths() {
        let server = StubServer::start(Reply::json(200, "[]")).await;
        let client = client_for(&server);
        let routes = client
            .routes()
            .await
            .expect("test invariant failed: empty routes");
        let by_id = client
            .routes_for(4)
            .await
            .expect("test invariant failed: empty routes for id");
        let driver = client
            .driver_route(2)
            .await
            .expect("test invariant failed: empty driver route");
        assert!(routes.is_empty() && by_id.is_empty() && driver.is_empty());
        let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/routes", "/routes/4", "/driver/2"]);
    }
}
