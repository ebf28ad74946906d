mod error;
mod palette;
mod render_config;
mod render_plan;
mod stop_marker;

pub use error::RenderError;
pub use palette::{Palette, DEFAULT_DEPOT_COLOR, DEFAULT_PALETTE};
pub use render_config::RenderConfig;
pub use render_plan::{Polyline, RenderPlan, RouteLayer};
pub use stop_marker::{MarkerKind, StopMarker};
