mod error;
mod navette_app;
mod navette_config;
pub mod ops;

pub use error::NavetteAppError;
pub use navette_app::{NavetteApp, NavetteOperation};
pub use navette_config::{DepotConfig, NavetteConfig};
