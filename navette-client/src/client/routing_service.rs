use super::{ClientError, RoutingServiceClient};
use navette_core::model::{
    DriverStop, FleetOptimizationRequest, OptimizationRequest, OptimizationResponse, Point,
    RouteRecord,
};
use std::future::Future;

/// the calls a session makes against the routing service. implemented by
/// [`RoutingServiceClient`] and by in-memory stubs in tests.
pub trait RoutingService {
    fn optimize_route(
        &self,
        request: &OptimizationRequest,
    ) -> impl Future<Output = Result<OptimizationResponse, ClientError>> + Send;

    fn optimize(
        &self,
        request: &FleetOptimizationRequest,
    ) -> impl Future<Output = Result<OptimizationResponse, ClientError>> + Send;

    fn points(&self) -> impl Future<Output = Result<Vec<Point>, ClientError>> + Send;

    /// stored route rows, for every route or only for `id`.
    fn routes(
        &self,
        id: Option<u64>,
    ) -> impl Future<Output = Result<Vec<RouteRecord>, ClientError>> + Send;

    fn driver_route(
        &self,
        driver_id: u32,
    ) -> impl Future<Output = Result<Vec<DriverStop>, ClientError>> + Send;
}

impl RoutingService for RoutingServiceClient {
    fn optimize_route(
        &self,
        request: &OptimizationRequest,
    ) -> impl Future<Output = Result<OptimizationResponse, ClientError>> + Send {
        RoutingServiceClient::optimize_route(self, request)
    }

    fn optimize(
        &self,
        request: &FleetOptimizationRequest,
    ) -> impl Future<Output = Result<OptimizationResponse, ClientError>> + Send {
        RoutingServiceClient::optimize(self, request)
    }

    fn points(&self) -> impl Future<Output = Result<Vec<Point>, ClientError>> + Send {
        RoutingServiceClient::points(self)
    }

    async fn routes(&self, id: Option<u64>) -> Result<Vec<RouteRecord>, ClientError> {
        match id {
            Some(id) => self.routes_for(id).await,
            None => RoutingServiceClient::routes(self).await,
        }
    }

    fn driver_route(
        &self,
        driver_id: u32,
    ) -> impl Future<Output = Result<Vec<DriverStop>, ClientError>> + Send {
        RoutingServiceClient::driver_route(self, driver_id)
    }
}
