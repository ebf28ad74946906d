use super::{RenderConfig, RenderError};
use serde::Deserialize;

/// route colors, indexed by `driver_id % len`.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#4CAF50", "#9C27B0", "#FF9800", "#5D9CEC", "#8B0000", "#000000", "#FFC0CB",
];
pub const DEFAULT_DEPOT_COLOR: &str = "#FF0000";

/// colors used to draw routes and depot markers. never empty.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RenderConfig")]
pub struct Palette {
    colors: Vec<String>,
    depot_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            depot_color: DEFAULT_DEPOT_COLOR.to_string(),
        }
    }
}

impl Palette {
    pub fn try_new(colors: Vec<String>, depot_color: String) -> Result<Palette, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        let colors = colors
            .iter()
            .map(|c| normalize_color(c))
            .collect::<Result<Vec<_>, _>>()?;
        let depot_color = normalize_color(&depot_color)?;
        Ok(Palette {
            colors,
            depot_color,
        })
    }

    /// the color of the route driven by `driver_id`.
    pub fn color_for(&self, driver_id: u32) -> &str {
        let index = driver_id as usize % self.colors.len();
        &self.colors[index]
    }

    pub fn depot_color(&self) -> &str {
        &self.depot_color
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl TryFrom<RenderConfig> for Palette {
    type Error = RenderError;

    fn try_from(config: RenderConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

/// trims and uppercases a `#RGB` or `#RRGGBB` color.
fn normalize_color(color: &str) -> Result<String, RenderError> {
    let trimmed = color.trim();
    let valid = match trimmed.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    };
    if valid {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(RenderError::InvalidColor(color.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_palette_cycles() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(0), "#4CAF50");
        assert_eq!(palette.color_for(6), "#FFC0CB");
        assert_eq!(palette.color_for(7), "#4CAF50");
        assert_eq!(palette.color_for(10), "#5D9CEC");
        assert_eq!(palette.depot_color(), "#FF0000");
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = Palette::try_new(vec![], String::from("#FF0000"));
        assert_eq!(result, Err(RenderError::EmptyPalette));
    }

    #[test]
    fn test_colors_normalized_and_checked() {
        let palette = Palette::try_new(vec![String::from(" #abc ")], String::from("#00ff00"))
            .expect("test invariant failed: colors should be valid");
        assert_eq!(palette.color_for(3), "#ABC");
        assert_eq!(palette.depot_color(), "#00FF00");

        let result = Palette::try_new(vec![String::from("green")], String::from("#FF0000"));
        assert_eq!(result, Err(RenderError::InvalidColor(String::from("green"))));
        let result = Palette::try_new(vec![String::from("#12345")], String::from("#FF0000"));
        assert!(matches!(result, Err(RenderError::InvalidColor(_))));
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let result = serde_json::from_str::<Palette>(r#"{"palette": []}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<Palette>(r#"{"palette": ["blue"]}"#);
        assert!(result.is_err());

        let palette: Palette = serde_json::from_str(r##"{"palette": ["#123456"]}"##)
            .expect("test invariant failed: palette should deserialize");
        assert_eq!(palette.color_for(4), "#123456");
        assert_eq!(palette.depot_color(), DEFAULT_DEPOT_COLOR);
    }
}
