use super::Cancelled;
use crate::client::ClientError;
use navette_core::input::InputError;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("an optimization is already in progress")]
    AlreadyInFlight,
    #[error("the request was cancelled")]
    Cancelled,
}

impl From<Cancelled> for SessionError {
    fn from(_: Cancelled) -> Self {
        SessionError::Cancelled
    }
}
