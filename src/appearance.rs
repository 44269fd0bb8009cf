//! Process-wide appearance configuration.
//!
//! Renderers translate a [`Trend`](crate::chart::Trend) into concrete colors.
//! The palette is installed once during application bootstrap and read-only
//! afterwards; nothing in this crate mutates it past that point.

use once_cell::sync::OnceCell;

use crate::chart::Trend;

static APPEARANCE: OnceCell<AppearanceConfig> = OnceCell::new();

/// Trend palette applied by consumers when rendering chart descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceConfig {
    /// Hex color for a non-decreasing series.
    pub positive_color: String,
    /// Hex color for a decreasing series.
    pub negative_color: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            positive_color: "#22c55e".to_string(),
            negative_color: "#ef4444".to_string(),
        }
    }
}

impl AppearanceConfig {
    /// Install this configuration as the process-wide palette.
    ///
    /// Returns the rejected config if a palette was already installed.
    pub fn install(self) -> Result<(), AppearanceConfig> {
        APPEARANCE.set(self)
    }

    /// The installed palette, or the default if none was installed.
    pub fn global() -> &'static AppearanceConfig {
        APPEARANCE.get_or_init(AppearanceConfig::default)
    }

    /// Resolve a trend to its configured hex color.
    pub fn color_for(&self, trend: Trend) -> &str {
        match trend {
            Trend::Positive => &self.positive_color,
            Trend::Negative => &self.negative_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let config = AppearanceConfig::default();
        assert_eq!(config.color_for(Trend::Positive), "#22c55e");
        assert_eq!(config.color_for(Trend::Negative), "#ef4444");
    }

    #[test]
    fn test_global_falls_back_to_default() {
        let config = AppearanceConfig::global();
        assert_eq!(config.color_for(Trend::Positive), "#22c55e");
    }
}
