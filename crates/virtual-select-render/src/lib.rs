//! Drawing surface contract for Virtual Select.
//!
//! This crate defines the small immediate-mode drawing interface the widget
//! paints through, together with the geometry and color value types shared by
//! the widget and its hosts.
//!
//! # Implementing a Surface
//!
//! Hosts adapt their own raster backend by implementing [`DrawingSurface`]:
//!
//! ```
//! use virtual_select_render::{Color, DrawingSurface, FontSpec, Point, Rect, Size};
//!
//! struct NullSurface {
//!     size: Size,
//! }
//!
//! impl DrawingSurface for NullSurface {
//!     fn size(&self) -> Size { self.size }
//!     fn resize(&mut self, size: Size) { self.size = size; }
//!     fn clear(&mut self, _rect: Rect) {}
//!     fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
//!     fn set_font(&mut self, _font: &FontSpec) {}
//!     fn measure_text_width(&self, text: &str) -> f32 { text.len() as f32 * 7.0 }
//!     fn draw_text(&mut self, _text: &str, _origin: Point, _color: Color) {}
//!     fn stroke_line(&mut self, _from: Point, _to: Point, _color: Color) {}
//! }
//! ```
//!
//! # Headless Rendering
//!
//! [`RecordingSurface`] records every operation, which is useful for tests and
//! for replaying a frame onto another backend:
//!
//! ```
//! use virtual_select_render::{Color, DrawCommand, DrawingSurface, Rect, RecordingSurface, Size};
//!
//! let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));
//! surface.fill_rect(Rect::new(0.0, 0.0, 200.0, 26.0), Color::ROYAL_BLUE);
//! assert!(matches!(surface.commands()[0], DrawCommand::FillRect { .. }));
//! ```

mod error;
mod recording;
mod surface;
mod types;

pub use error::{RenderError, RenderResult};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{DrawingSurface, FontSpec};
pub use types::{Color, Point, Rect, Size};
