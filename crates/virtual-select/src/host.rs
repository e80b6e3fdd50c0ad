//! The contract between the widget and the environment that embeds it.
//!
//! A [`SelectHost`] owns everything outside the rendering and interaction
//! engine: the header element, popup positioning, style resolution and the
//! drawing surface the popup list is painted on.

use virtual_select_render::{DrawingSurface, Rect, Size};

use crate::style::StyleSnapshot;

/// Direction of the header's disclosure arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrowDirection {
    /// Popup closed.
    #[default]
    Down,
    /// Popup open.
    Up,
}

/// What the header should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// The selected item's text, or the placeholder.
    pub text: String,
    /// Whether `text` is the placeholder.
    pub is_placeholder: bool,
    /// Arrow direction.
    pub arrow: ArrowDirection,
    /// Whether the widget is disabled.
    pub disabled: bool,
}

/// Which side of the anchor the popup opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PopupSide {
    #[default]
    Below,
    Above,
}

/// Size and placement of the open popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupLayout {
    /// Side of the anchor the popup is attached to.
    pub side: PopupSide,
    /// Surface size in pixels.
    pub size: Size,
    /// Width of the strip joining header and popup, `min(style width, popup width)`.
    pub patch_width: f32,
}

/// The environment a [`VirtualSelect`](crate::VirtualSelect) is embedded in.
pub trait SelectHost {
    /// Widget bounds in viewport coordinates.
    fn anchor_rect(&self) -> Rect;

    /// Height of the viewport the popup must fit in.
    fn viewport_height(&self) -> f32;

    /// Room between the viewport top and the anchor.
    fn space_above(&self) -> f32 {
        self.anchor_rect().top()
    }

    /// Room between the anchor and the viewport bottom.
    fn space_below(&self) -> f32 {
        self.viewport_height() - self.anchor_rect().bottom()
    }

    /// Current resolved style.
    fn style(&self) -> StyleSnapshot;

    /// Present the header.
    fn update_header(&mut self, header: &HeaderView);

    /// Show the popup with the given layout, or hide it with `None`.
    fn set_popup(&mut self, layout: Option<&PopupLayout>);

    /// The surface the popup list is painted on.
    fn surface(&mut self) -> &mut dyn DrawingSurface;
}
