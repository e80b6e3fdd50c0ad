//! Prelude module for Virtual Select.
//!
//! ```ignore
//! use virtual_select::prelude::*;
//! ```
//!
//! This provides the widget, its host contract, input events, signals and the
//! geometry types hosts work with.

// ============================================================================
// Widget
// ============================================================================

pub use crate::config::{Palette, SelectConfig};
pub use crate::error::{SelectError, SelectResult};
pub use crate::planner::{PaintDisposition, RenderScope, RowContext, RowPainter};
pub use crate::widget::{PopupState, VirtualSelect};

// ============================================================================
// Host Contract
// ============================================================================

pub use crate::host::{ArrowDirection, HeaderView, PopupLayout, PopupSide, SelectHost};
pub use crate::style::StyleSnapshot;

// ============================================================================
// Input Events
// ============================================================================

pub use crate::events::{
    Key, KeyPressEvent, KeyResponse, KeyboardModifiers, MouseButton, PointerEvent, WheelEvent,
};

// ============================================================================
// Signals and Geometry
// ============================================================================

pub use virtual_select_core::{ConnectionId, Signal, VetoSignal};
pub use virtual_select_render::{Color, DrawingSurface, FontSpec, Point, Rect, Size};
