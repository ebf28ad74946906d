use super::{Palette, RenderError, DEFAULT_DEPOT_COLOR, DEFAULT_PALETTE};
use serde::{Deserialize, Serialize};

/// the `[render]` section of a navette configuration file. unset values
/// fall back to the default palette.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RenderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot_color: Option<String>,
}

impl RenderConfig {
    pub fn build(&self) -> Result<Palette, RenderError> {
        let colors = self
            .palette
            .clone()
            .unwrap_or_else(|| DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect());
        let depot_color = self
            .depot_color
            .clone()
            .unwrap_or_else(|| DEFAULT_DEPOT_COLOR.to_string());
        Palette::try_new(colors, depot_color)
    }
}
