use std::path::Path;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use navette_client::client::RoutingServiceConfig;
use navette_core::{
    input::InputError,
    model::{FleetOptimizationRequest, LatLng},
};
use navette_render::plan::RenderConfig;
use serde::{Deserialize, Serialize};

use super::NavetteAppError;

/// prefix of environment variables overriding file values, e.g.
/// `NAVETTE__SERVICE__BASE_URL`.
pub const ENV_PREFIX: &str = "NAVETTE";
const ENV_SEPARATOR: &str = "__";

/// contents of a navette TOML configuration file. every section is optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NavetteConfig {
    #[serde(default)]
    pub service: RoutingServiceConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub depot: DepotConfig,
    #[serde(default)]
    pub fleet: FleetOptimizationRequest,
}

/// the location routes depart from and return to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DepotConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            name: String::from("Château de Dinan"),
            latitude: 48.450387,
            longitude: -2.044774,
        }
    }
}

impl DepotConfig {
    pub fn lat_lng(&self) -> Result<LatLng, InputError> {
        LatLng::try_new(self.latitude, self.longitude)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
}

impl NavetteConfig {
    /// reads `configuration_file` when given, then applies `NAVETTE__*`
    /// environment overrides.
    pub fn from_file(configuration_file: Option<&str>) -> Result<NavetteConfig, NavetteAppError> {
        let mut builder = Config::builder();
        if let Some(file) = configuration_file {
            builder = builder.add_source(File::from(Path::new(file)));
        }
        let builder = builder.add_source(environment());
        let source = configuration_file.unwrap_or("environment");
        NavetteConfig::build(builder, source)
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        source: &str,
    ) -> Result<NavetteConfig, NavetteAppError> {
        let config = builder.build().map_err(|e| {
            let msg = format!("file '{source}' produced error: {e}");
            NavetteAppError::InvalidUserInput(msg)
        })?;
        config.try_deserialize::<NavetteConfig>().map_err(|e| {
            let msg = format!("error reading configuration from '{source}': {e}");
            NavetteAppError::InvalidUserInput(msg)
        })
    }
}
