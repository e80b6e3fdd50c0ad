//! Resolved style values the widget reads from its host.

use virtual_select_render::{Color, FontSpec};

/// A snapshot of the host's resolved style for the widget.
///
/// Style resolution belongs to the host; the widget only reads these values
/// when it opens and when it paints.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    /// Font size in pixels, when known.
    pub font_size: Option<f32>,
    /// Font family list, when known.
    pub font_family: Option<String>,
    /// Text color for unselected rows.
    pub foreground: Color,
    /// Popup background, when the host defines one.
    pub background: Option<Color>,
    /// Resolved widget width, when the host defines one.
    pub width: Option<f32>,
}

impl StyleSnapshot {
    /// Row height used when no font size is known.
    pub const DEFAULT_ITEM_HEIGHT: f32 = 26.0;
    /// Vertical padding added to the font size to get the row height.
    pub const ITEM_PADDING: f32 = 12.0;
    /// Font size used for painting when none is known.
    pub const DEFAULT_FONT_SIZE: f32 = 14.0;
    /// Font family used for painting when none is known.
    pub const DEFAULT_FONT_FAMILY: &'static str = "Arial, sans-serif";

    /// Create an empty snapshot: no font metrics, black text, default background.
    pub fn new() -> Self {
        Self {
            font_size: None,
            font_family: None,
            foreground: Color::BLACK,
            background: None,
            width: None,
        }
    }

    /// Set the font size using builder pattern.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the font family using builder pattern.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the foreground color using builder pattern.
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    /// Set the background color using builder pattern.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the resolved width using builder pattern.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// The font size, if it is a usable positive value.
    pub fn usable_font_size(&self) -> Option<f32> {
        self.font_size.filter(|size| size.is_finite() && *size > 0.0)
    }

    /// Height of one row: `font_size + 12`, or 26 when no font size is known.
    pub fn item_height(&self) -> f32 {
        self.usable_font_size()
            .map_or(Self::DEFAULT_ITEM_HEIGHT, |size| size + Self::ITEM_PADDING)
    }

    /// The font rows are painted with.
    pub fn font(&self) -> FontSpec {
        FontSpec {
            size: self.usable_font_size().unwrap_or(Self::DEFAULT_FONT_SIZE),
            family: self
                .font_family
                .clone()
                .filter(|family| !family.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_FONT_FAMILY.to_string()),
        }
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
