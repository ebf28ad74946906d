use super::{CancellationScope, Cancelled, SessionError};
use crate::client::{ClientError, RoutingService};
use navette_core::input::PointCollector;
use navette_core::model::{FleetOptimizationRequest, OptimizationResponse, Point};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// the state one map screen renders from. replaced only by a successful
/// optimization; failures are recorded in `last_error` and leave the rest
/// untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub response: Option<OptimizationResponse>,
    pub selected_driver: Option<u32>,
    pub points: Vec<Point>,
    pub in_flight: bool,
    pub last_error: Option<String>,
}

/// ties a routing service to the lifetime of one screen. at most one
/// optimization runs at a time and every pending call is cancelled by
/// [`OptimizationSession::teardown`] or when the session is dropped.
pub struct OptimizationSession<S> {
    service: S,
    scope: CancellationScope,
    state: Mutex<SessionSnapshot>,
}

/// holds the in-flight flag for one optimization call and clears it when
/// the call ends in any way, including the call future being dropped.
struct InFlightGuard<'a> {
    state: &'a Mutex<SessionSnapshot>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight = false;
    }
}

impl<S> OptimizationSession<S> {
    pub fn new(service: S) -> OptimizationSession<S> {
        OptimizationSession {
            service,
            scope: CancellationScope::new(),
            state: Mutex::new(SessionSnapshot::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().clone()
    }

    pub fn response(&self) -> Option<OptimizationResponse> {
        self.lock_state().response.clone()
    }

    /// the active driver after falling back to the first route.
    pub fn selected_driver(&self) -> Option<u32> {
        self.lock_state().selected_driver
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock_state().in_flight
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// makes `driver_id` the active route, or the first route when no route
    /// belongs to that driver. returns the driver that ended up active.
    pub fn select_driver(&self, driver_id: u32) -> Option<u32> {
        let mut state = self.lock_state();
        let active = state
            .response
            .as_ref()
            .and_then(|r| r.resolve_driver(Some(driver_id)));
        state.selected_driver = active;
        active
    }

    /// cancels pending calls. the session accepts no further calls.
    pub fn teardown(&self) {
        log::debug!("tearing down optimization session");
        self.scope.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.scope.is_cancelled()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SessionError> {
        if self.scope.is_cancelled() {
            log::warn!("optimization requested after session teardown");
            return Err(SessionError::Cancelled);
        }
        let mut state = self.lock_state();
        if state.in_flight {
            log::warn!("optimization requested while another is in progress, ignoring");
            return Err(SessionError::AlreadyInFlight);
        }
        state.in_flight = true;
        Ok(InFlightGuard { state: &self.state })
    }

    fn record_error(&self, error: &SessionError) {
        log::error!("{error}");
        self.lock_state().last_error = Some(error.to_string());
    }

    fn settle(
        &self,
        outcome: Result<Result<OptimizationResponse, ClientError>, Cancelled>,
    ) -> Result<OptimizationResponse, SessionError> {
        match outcome {
            Err(Cancelled) => {
                log::info!("optimization cancelled");
                Err(SessionError::Cancelled)
            }
            Ok(Err(e)) => {
                let error = SessionError::from(e);
                self.record_error(&error);
                Err(error)
            }
            Ok(Ok(response)) => {
                let mut state = self.lock_state();
                state.selected_driver = response.resolve_driver(state.selected_driver);
                state.response = Some(response.clone());
                state.last_error = None;
                Ok(response)
            }
        }
    }
}

impl<S: RoutingService> OptimizationSession<S> {
    /// validates the collected points and requests `/optimize_route`. with
    /// fewer than two delivery points nothing is sent.
    pub async fn optimize(
        &self,
        collector: &PointCollector,
    ) -> Result<OptimizationResponse, SessionError> {
        let request = match collector.build_request() {
            Ok(request) => request,
            Err(e) => {
                let error = SessionError::from(e);
                self.record_error(&error);
                return Err(error);
            }
        };
        let _guard = self.begin()?;
        let outcome = self.scope.run(self.service.optimize_route(&request)).await;
        self.settle(outcome)
    }

    /// requests `/optimize` over the service's stored pickup points.
    pub async fn optimize_fleet(
        &self,
        request: &FleetOptimizationRequest,
    ) -> Result<OptimizationResponse, SessionError> {
        let _guard = self.begin()?;
        let outcome = self.scope.run(self.service.optimize(request)).await;
        self.settle(outcome)
    }

    /// fetches the pickup points and keeps them for display.
    pub async fn load_points(&self) -> Result<Vec<Point>, SessionError> {
        if self.scope.is_cancelled() {
            return Err(SessionError::Cancelled);
        }
        match self.scope.run(self.service.points()).await? {
            Ok(points) => {
                self.lock_state().points = points.clone();
                Ok(points)
            }
            Err(e) => {
                let error = SessionError::from(e);
                self.record_error(&error);
                Err(error)
            }
        }
    }
}

impl<S> Drop for OptimizationSession<S> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
