//! The drawing surface contract.
//!
//! A [`DrawingSurface`] is the raster target the widget paints its popup list
//! onto. Hosts implement it over whatever backend they own (a 2D canvas, a
//! software framebuffer, a GPU renderer). The widget only ever issues the small
//! set of immediate-mode operations defined here.

use std::fmt;

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Point, Rect, Size};

/// Font selection for text drawing and measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size: f32,
    /// Font family list, as the host understands it.
    pub family: String,
}

impl FontSpec {
    /// Default family when the host style does not name one.
    pub const DEFAULT_FAMILY: &'static str = "sans-serif";

    /// Create a font spec, rejecting non-positive or non-finite sizes.
    pub fn new(size: f32, family: impl Into<String>) -> RenderResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(RenderError::InvalidFontSize { size });
        }
        Ok(Self {
            size,
            family: family.into(),
        })
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: 14.0,
            family: Self::DEFAULT_FAMILY.to_string(),
        }
    }
}

/// Formats as a CSS font shorthand, e.g. `14px sans-serif`.
impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Immediate-mode drawing target.
///
/// # Coordinates
///
/// All coordinates are surface pixels relative to the top-left corner.
/// [`draw_text`](Self::draw_text) positions text by its left edge and its
/// vertical middle, so a row's label is drawn at the row's center line.
pub trait DrawingSurface {
    /// Current surface dimensions.
    fn size(&self) -> Size;

    /// Resize the surface. Contents after a resize are unspecified.
    fn resize(&mut self, size: Size);

    /// Clear a region to transparent.
    fn clear(&mut self, rect: Rect);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Select the font used by subsequent text measurement and drawing.
    fn set_font(&mut self, font: &FontSpec);

    /// Width of `text` in pixels with the current font.
    fn measure_text_width(&self, text: &str) -> f32;

    /// Draw a single line of text, left-aligned and vertically centered on `origin.y`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);

    /// Stroke a 1px line.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size)
    }

    fn clear(&mut self, rect: Rect) {
        (**self).clear(rect)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color)
    }

    fn set_font(&mut self, font: &FontSpec) {
        (**self).set_font(font)
    }

    fn measure_text_width(&self, text: &str) -> f32 {
        (**self).measure_text_width(text)
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        (**self).draw_text(text, origin, color)
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        (**self).stroke_line(from, to, color)
    }
}
