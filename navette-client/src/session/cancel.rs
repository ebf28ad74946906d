use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// groups the pending calls of one owner so they can be aborted together.
///
/// once [`CancellationScope::cancel`] has been called the scope stays closed:
/// futures still running resolve to [`Cancelled`] and futures passed to
/// [`CancellationScope::run`] afterwards are never polled.
#[derive(Clone, Debug, Default)]
pub struct CancellationScope {
    inner: Arc<Mutex<ScopeState>>,
}

#[derive(Debug, Default)]
struct ScopeState {
    closed: bool,
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
}

/// removes a handle from its scope when the call it belongs to ends,
/// whether it completed, was aborted or was dropped.
struct Registration {
    scope: Arc<Mutex<ScopeState>>,
    id: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut state = self.scope.lock().unwrap_or_else(PoisonError::into_inner);
        state.handles.retain(|(id, _)| *id != self.id);
    }
}

impl CancellationScope {
    pub fn new() -> CancellationScope {
        CancellationScope::default()
    }

    /// drives `future` to completion unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        let (handle, abort_registration) = AbortHandle::new_pair();
        let _registration = {
            let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            if state.closed {
                return Err(Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.handles.push((id, handle));
            Registration {
                scope: self.inner.clone(),
                id,
            }
        };
        Abortable::new(future, abort_registration)
            .await
            .map_err(|Aborted| Cancelled)
    }

    /// aborts every pending call and closes the scope. calling this again, or
    /// after all calls completed, has no further effect.
    pub fn cancel(&self) {
        let handles = {
            let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.closed = true;
            std::mem::take(&mut state.handles)
        };
        if !handles.is_empty() {
            log::debug!("aborting {} pending calls", handles.len());
        }
        for (_, handle) in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    /// number of calls currently running inside the scope.
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handles
            .len()
    }
}
