use std::path::PathBuf;

use navette_client::{client::ClientError, session::SessionError};
use navette_core::{input::InputError, model::ModelError};
use navette_render::plan::RenderError;

#[derive(thiserror::Error, Debug)]
pub enum NavetteAppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Error creating a runtime to handle async code: {0}")]
    TokioError(String),
}
