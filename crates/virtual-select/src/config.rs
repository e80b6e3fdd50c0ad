//! Declarative widget configuration.
//!
//! A [`SelectConfig`] can be built in code or loaded from TOML. Missing keys
//! take their defaults, and colors are written as hex strings:
//!
//! ```
//! use virtual_select::SelectConfig;
//!
//! let config = SelectConfig::from_toml_str(r##"
//!     visible_items = 8
//!     placeholder = "Choose a country"
//!
//!     [palette]
//!     selection_background = "#2e7d32"
//! "##).unwrap();
//!
//! assert_eq!(config.visible_items, 8);
//! assert_eq!(config.min_thumb_height, 15.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use virtual_select_render::Color;

use crate::error::{ConfigError, ConfigResult};
use crate::scrollbar::ScrollbarController;
use crate::scroller::ViewportScroller;

/// Colors used to paint the popup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill behind the highlighted row.
    #[serde(with = "hex_color")]
    pub selection_background: Color,
    /// Text color of the highlighted row.
    #[serde(with = "hex_color")]
    pub selection_text: Color,
    /// Row separator lines.
    #[serde(with = "hex_color")]
    pub separator: Color,
    /// Scrollbar thumb.
    #[serde(with = "hex_color")]
    pub thumb: Color,
    /// Popup background when the style does not provide one.
    #[serde(with = "hex_color")]
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            selection_background: Color::ROYAL_BLUE,
            selection_text: Color::WHITE,
            separator: Color::SEPARATOR_GRAY,
            thumb: Color::THUMB_SHADE,
            background: Color::WHITE,
        }
    }
}

/// Widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Rows shown in the popup at once.
    pub visible_items: usize,
    /// Header text when nothing is selected.
    pub placeholder: String,
    /// Whether the widget starts disabled.
    pub disabled: bool,
    /// Popup width in pixels; `0` uses the anchor width.
    pub popup_width: f32,
    /// Smallest scrollbar thumb height in pixels.
    pub min_thumb_height: f32,
    /// Popup colors.
    pub palette: Palette,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            visible_items: ViewportScroller::DEFAULT_VISIBLE_ITEMS,
            placeholder: String::new(),
            disabled: false,
            popup_width: 0.0,
            min_thumb_height: ScrollbarController::DEFAULT_MIN_THUMB_HEIGHT,
            palette: Palette::default(),
        }
    }
}

impl SelectConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: "virtual_select::interaction",
            path = %path.display(),
            "loaded select configuration"
        );
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.visible_items == 0 {
            return Err(ConfigError::Invalid {
                field: "visible_items",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.popup_width.is_finite() || self.popup_width < 0.0 {
            return Err(ConfigError::Invalid {
                field: "popup_width",
                reason: format!("must be a non-negative number, got {}", self.popup_width),
            });
        }
        if !self.min_thumb_height.is_finite() || self.min_thumb_height < 0.0 {
            return Err(ConfigError::Invalid {
                field: "min_thumb_height",
                reason: format!(
                    "must be a non-negative number, got {}",
                    self.min_thumb_height
                ),
            });
        }
        Ok(())
    }
}

/// Serde adapter storing a [`Color`] as a `#rrggbbaa` string.
mod hex_color {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use virtual_select_render::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        Color::parse_hex(&value).map_err(D::Error::custom)
    }
}
