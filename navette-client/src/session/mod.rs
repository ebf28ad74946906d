mod cancel;
mod error;
mod optimization_session;

pub use cancel::{CancellationScope, Cancelled};
pub use error::SessionError;
pub use optimization_session::{OptimizationSession, SessionSnapshot};
