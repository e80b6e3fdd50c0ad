//! Virtual Select - a virtualized single-select list widget.
//!
//! The widget shows a header with the current choice and, on demand, a popup
//! list painted onto a [`DrawingSurface`](render::DrawingSurface). Only the
//! rows inside the viewport are painted, so lists of hundreds of thousands of
//! items open and scroll as fast as short ones.
//!
//! # Components
//!
//! - [`SelectionModel`]: items, highlighted and committed indices, placeholder
//! - [`ViewportScroller`]: scroll offset, row height, visible row range
//! - [`ScrollbarController`]: thumb geometry, hit testing and drag sessions
//! - [`RenderPlanner`]: popup placement, label truncation, row painting
//! - [`VirtualSelect`]: the state machine tying them together behind a
//!   [`SelectHost`]
//!
//! # Example
//!
//! ```
//! use virtual_select::prelude::*;
//! use virtual_select::render::RecordingSurface;
//!
//! struct Host {
//!     surface: RecordingSurface,
//! }
//!
//! impl SelectHost for Host {
//!     fn anchor_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 240.0, 24.0)
//!     }
//!
//!     fn viewport_height(&self) -> f32 {
//!         600.0
//!     }
//!
//!     fn style(&self) -> StyleSnapshot {
//!         StyleSnapshot::new()
//!     }
//!
//!     fn update_header(&mut self, _header: &HeaderView) {}
//!
//!     fn set_popup(&mut self, _layout: Option<&PopupLayout>) {}
//!
//!     fn surface(&mut self) -> &mut dyn DrawingSurface {
//!         &mut self.surface
//!     }
//! }
//!
//! let host = Host { surface: RecordingSurface::default() };
//! let mut select = VirtualSelect::new(host)
//!     .with_items((0..100_000).map(|i| format!("Row {i}")).collect())
//!     .with_placeholder("Pick a row");
//!
//! select.change.connect(|&index| println!("committed {index}"));
//!
//! select.show_drop_down();
//! assert!(select.select_item(42));
//! assert_eq!(select.selected_value().map(String::as_str), Some("Row 42"));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod model;
pub mod planner;
pub mod prelude;
pub mod scrollbar;
pub mod scroller;
pub mod style;
pub mod widget;

pub use config::{Palette, SelectConfig};
pub use error::{ConfigError, ConfigResult, SelectError, SelectResult};
pub use events::{
    Key, KeyPressEvent, KeyResponse, KeyboardModifiers, MouseButton, PointerEvent, WheelEvent,
};
pub use host::{ArrowDirection, HeaderView, PopupLayout, PopupSide, SelectHost};
pub use model::SelectionModel;
pub use planner::{
    PaintDisposition, PopupPlacement, RenderPlanner, RenderScope, RowContext, RowPainter,
    place_popup, truncate_label,
};
pub use scrollbar::{DragState, ScrollbarController, ScrollbarGeometry, ScrollbarHit};
pub use scroller::ViewportScroller;
pub use style::StyleSnapshot;
pub use widget::{OpenHook, PopupState, VirtualSelect};

pub use virtual_select_core::{ConnectionGuard, ConnectionId, PerfSpan, Signal, VetoSignal};

/// Log targets and performance spans.
pub mod logging {
    pub use virtual_select_core::logging::*;
}

/// Drawing surfaces and geometry types.
pub mod render {
    pub use virtual_select_render::*;
}
