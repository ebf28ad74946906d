#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("'{0}' is not a hex color, expected #RGB or #RRGGBB")]
    InvalidColor(String),
    #[error("failed to write GeoJSON: {0}")]
    GeoJson(String),
}
