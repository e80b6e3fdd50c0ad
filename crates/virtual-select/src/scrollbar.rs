//! Scrollbar geometry and the thumb drag session.
//!
//! The scrollbar is an overlay along the right edge of the popup surface. Its
//! geometry is recomputed from the current scroll state on every query and is
//! absent whenever all items fit in the viewport.
//!
//! # Drag Session
//!
//! ```text
//! Idle --press on thumb--> Dragging --release--> Releasing --end_drag_session--> Idle
//! ```
//!
//! While `Dragging` or `Releasing`, a click on the popup belongs to the drag
//! gesture and must not select a row. The host ends the session after it has
//! dispatched that click (or once per input dispatch cycle). A new press also
//! finalizes any stale `Releasing` phase.

use virtual_select_render::{Point, Rect, Size};

use crate::scroller::ViewportScroller;

/// Derived scrollbar geometry for one surface size and scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    /// The full-height track.
    pub track: Rect,
    /// The thumb, in hit-test width.
    pub thumb: Rect,
    /// The band that counts as "on the scrollbar" for pointer input.
    pub hit_band: Rect,
    /// Largest scroll offset in pixels.
    pub max_scroll: f64,
}

impl ScrollbarGeometry {
    /// Width of the thumb's hit area.
    pub const THUMB_WIDTH: f32 = 6.0;
    /// Width the thumb is painted at.
    pub const THUMB_PAINT_WIDTH: f32 = 4.0;
    /// Extra hit area to the left of the thumb.
    pub const HIT_SLOP: f32 = 6.0;

    /// Room the thumb can travel along the track (never below 1).
    pub fn travel(&self) -> f32 {
        (self.track.height() - self.thumb.height()).max(1.0)
    }

    /// The thumb rectangle as painted.
    pub fn thumb_paint_rect(&self) -> Rect {
        Rect::new(
            self.thumb.left(),
            self.thumb.top(),
            Self::THUMB_PAINT_WIDTH,
            self.thumb.height(),
        )
    }
}

/// Result of hit-testing a pointer position against the scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollbarHit {
    /// Not on the scrollbar.
    #[default]
    None,
    /// On the thumb.
    Thumb,
    /// In the scrollbar band but off the thumb.
    Track,
}

/// Phase of the thumb drag session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// The thumb is being dragged.
    Dragging {
        /// Pointer y when the drag started.
        start_y: f32,
        /// Scroll offset when the drag started.
        start_offset: f64,
    },
    /// The pointer was released; the gesture's click has not been evaluated yet.
    Releasing,
}

/// Computes thumb geometry and drives the drag session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarController {
    min_thumb_height: f32,
    drag: DragState,
}

impl ScrollbarController {
    /// Default minimum thumb height in pixels.
    pub const DEFAULT_MIN_THUMB_HEIGHT: f32 = 15.0;

    /// Create a controller with the default minimum thumb height.
    pub fn new() -> Self {
        Self {
            min_thumb_height: Self::DEFAULT_MIN_THUMB_HEIGHT,
            drag: DragState::Idle,
        }
    }

    /// Set the minimum thumb height using builder pattern.
    pub fn with_min_thumb_height(mut self, height: f32) -> Self {
        self.set_min_thumb_height(height);
        self
    }

    /// Minimum thumb height in pixels.
    pub fn min_thumb_height(&self) -> f32 {
        self.min_thumb_height
    }

    /// Set the minimum thumb height (negative values become 0).
    pub fn set_min_thumb_height(&mut self, height: f32) {
        self.min_thumb_height = height.max(0.0);
    }

    /// Current drag phase.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether the thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Scrollbar geometry for a surface of `surface` size, or `None` when all
    /// `len` items fit.
    pub fn geometry(
        &self,
        surface: Size,
        len: usize,
        scroller: &ViewportScroller,
    ) -> Option<ScrollbarGeometry> {
        if !scroller.is_scrollable(len) {
            return None;
        }

        let track_h = surface.height.max(0.0);
        let ratio = (scroller.visible_items() as f32 / len as f32).min(1.0);
        let thumb_h = (track_h * ratio).max(self.min_thumb_height);
        let max_scroll = scroller.max_scroll(len);
        let thumb_y = if max_scroll == 0.0 {
            0.0
        } else {
            (scroller.offset() / max_scroll * f64::from(track_h - thumb_h)) as f32
        };

        let x = surface.width - ScrollbarGeometry::THUMB_WIDTH;
        let band_x = x - ScrollbarGeometry::HIT_SLOP;
        Some(ScrollbarGeometry {
            track: Rect::new(x, 0.0, ScrollbarGeometry::THUMB_WIDTH, track_h),
            thumb: Rect::new(x, thumb_y, ScrollbarGeometry::THUMB_WIDTH, thumb_h),
            hit_band: Rect::new(band_x, 0.0, surface.width - band_x, track_h),
            max_scroll,
        })
    }

    /// Classify a pointer position.
    ///
    /// Anything at or right of the band's left edge counts, so presses just
    /// past the surface edge still reach the scrollbar. The thumb's vertical
    /// extent is inclusive at both ends.
    pub fn hit_test(geometry: Option<&ScrollbarGeometry>, pos: Point) -> ScrollbarHit {
        let Some(geometry) = geometry else {
            return ScrollbarHit::None;
        };
        if pos.x < geometry.hit_band.left() {
            return ScrollbarHit::None;
        }
        if pos.y >= geometry.thumb.top() && pos.y <= geometry.thumb.bottom() {
            ScrollbarHit::Thumb
        } else {
            ScrollbarHit::Track
        }
    }

    // =========================================================================
    // Drag Session
    // =========================================================================

    /// Handle a press on the popup. Starts a drag and returns `true` when the
    /// press lands on the thumb.
    pub fn press(
        &mut self,
        pos: Point,
        geometry: Option<&ScrollbarGeometry>,
        scroller: &ViewportScroller,
    ) -> bool {
        if self.drag == DragState::Releasing {
            self.end_drag_session();
        }

        if Self::hit_test(geometry, pos) != ScrollbarHit::Thumb {
            return false;
        }

        self.drag = DragState::Dragging {
            start_y: pos.y,
            start_offset: scroller.offset(),
        };
        tracing::debug!(target: "virtual_select::scrollbar", start_y = pos.y, start_offset = scroller.offset(), "drag started");
        true
    }

    /// Follow the pointer while dragging. Returns `true` if a drag is active.
    pub fn drag_to(
        &mut self,
        y: f32,
        geometry: Option<&ScrollbarGeometry>,
        len: usize,
        scroller: &mut ViewportScroller,
    ) -> bool {
        let DragState::Dragging {
            start_y,
            start_offset,
        } = self.drag
        else {
            return false;
        };

        let Some(geometry) = geometry else {
            return true;
        };

        let delta = f64::from(y - start_y);
        let target =
            start_offset + (delta / f64::from(geometry.travel()) * geometry.max_scroll).round();
        scroller.set_offset(target, len);
        true
    }

    /// Handle pointer release. Moves `Dragging` to `Releasing` and returns
    /// `true` if a drag was active.
    pub fn release(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.drag = DragState::Releasing;
        tracing::debug!(target: "virtual_select::scrollbar", "drag released");
        true
    }

    /// Whether a click arriving now belongs to a drag gesture.
    pub fn suppresses_click(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// Finish a released drag session. A drag still in progress is left alone.
    pub fn end_drag_session(&mut self) -> bool {
        if self.drag != DragState::Releasing {
            return false;
        }
        self.drag = DragState::Idle;
        tracing::trace!(target: "virtual_select::scrollbar", "drag session ended");
        true
    }

    /// Abandon any drag session immediately.
    pub fn cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Jump the viewport for a click on the track at `y`.
    ///
    /// The offset becomes `floor(y / surface_height * max_scroll)`, clamped.
    pub fn track_jump(
        &self,
        y: f32,
        surface_height: f32,
        len: usize,
        scroller: &mut ViewportScroller,
    ) {
        if surface_height <= 0.0 {
            return;
        }
        let max_scroll = scroller.max_scroll(len);
        let target = (f64::from(y) / f64::from(surface_height) * max_scroll).floor();
        scroller.set_offset(target, len);
        tracing::debug!(target: "virtual_select::scrollbar", y, offset = scroller.offset(), "track jump");
    }
}

impl Default for ScrollbarController {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(ScrollbarController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSnapshot;

    const SURFACE: Size = Size::new(200.0, 130.0);

    fn scroller(visible: usize, len: usize) -> ViewportScroller {
        let mut scroller = ViewportScroller::new(visible);
        scroller.open(-1, len, &StyleSnapshot::new());
        scroller
    }

    #[test]
    fn test_no_geometry_when_content_fits() {
        let controller = ScrollbarController::new();
        assert!(controller.geometry(SURFACE, 5, &scroller(5, 5)).is_none());
        assert!(controller.geometry(SURFACE, 0, &scroller(5, 0)).is_none());
    }

    #[test]
    fn test_thumb_geometry() {
        let controller = ScrollbarController::new();
        let scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller).unwrap();

        assert_eq!(geo.thumb, Rect::new(194.0, 0.0, 6.0, 65.0));
        assert_eq!(geo.hit_band.left(), 188.0);
        assert_eq!(geo.max_scroll, 130.0);
        assert_eq!(geo.thumb_paint_rect().width(), 4.0);
    }

    #[test]
    fn test_thumb_moves_with_offset() {
        let controller = ScrollbarController::new();
        let mut scroller = scroller(5, 10);
        scroller.set_offset(130.0, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller).unwrap();
        // At max scroll, the thumb bottom meets the track bottom.
        assert_eq!(geo.thumb.bottom(), 130.0);
    }

    #[test]
    fn test_min_thumb_height() {
        let controller = ScrollbarController::new();
        let scroller = scroller(5, 10_000);
        let geo = controller.geometry(SURFACE, 10_000, &scroller).unwrap();
        assert_eq!(geo.thumb.height(), 15.0);

        let controller = ScrollbarController::new().with_min_thumb_height(30.0);
        let geo = controller.geometry(SURFACE, 10_000, &scroller).unwrap();
        assert_eq!(geo.thumb.height(), 30.0);
    }

    #[test]
    fn test_hit_test() {
        let controller = ScrollbarController::new();
        let scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller);

        assert_eq!(
            ScrollbarController::hit_test(geo.as_ref(), Point::new(190.0, 10.0)),
            ScrollbarHit::Thumb
        );
        assert_eq!(
            ScrollbarController::hit_test(geo.as_ref(), Point::new(190.0, 65.0)),
            ScrollbarHit::Thumb
        );
        assert_eq!(
            ScrollbarController::hit_test(geo.as_ref(), Point::new(196.0, 100.0)),
            ScrollbarHit::Track
        );
        assert_eq!(
            ScrollbarController::hit_test(geo.as_ref(), Point::new(100.0, 10.0)),
            ScrollbarHit::None
        );
        assert_eq!(
            ScrollbarController::hit_test(None, Point::new(199.0, 10.0)),
            ScrollbarHit::None
        );
    }

    #[test]
    fn test_drag_session_lifecycle() {
        let mut controller = ScrollbarController::new();
        let mut scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller);

        assert!(!controller.suppresses_click());
        assert!(controller.press(Point::new(195.0, 20.0), geo.as_ref(), &scroller));
        assert!(controller.is_dragging());
        assert!(controller.suppresses_click());

        // Travel is 130 - 65 = 65px for 130px of content.
        assert!(controller.drag_to(52.5, geo.as_ref(), 10, &mut scroller));
        assert_eq!(scroller.offset(), 65.0);

        assert!(controller.release());
        assert_eq!(controller.drag_state(), DragState::Releasing);
        assert!(controller.suppresses_click());
        assert!(!controller.drag_to(100.0, geo.as_ref(), 10, &mut scroller));

        assert!(controller.end_drag_session());
        assert_eq!(controller.drag_state(), DragState::Idle);
        assert!(!controller.end_drag_session());
    }

    #[test]
    fn test_press_off_thumb_does_not_drag() {
        let mut controller = ScrollbarController::new();
        let scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller);
        assert!(!controller.press(Point::new(195.0, 120.0), geo.as_ref(), &scroller));
        assert!(!controller.press(Point::new(20.0, 20.0), geo.as_ref(), &scroller));
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_new_press_finalizes_stale_release() {
        let mut controller = ScrollbarController::new();
        let scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller);

        controller.press(Point::new(195.0, 5.0), geo.as_ref(), &scroller);
        controller.release();
        assert!(!controller.press(Point::new(20.0, 5.0), geo.as_ref(), &scroller));
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_clamps() {
        let mut controller = ScrollbarController::new();
        let mut scroller = scroller(5, 10);
        let geo = controller.geometry(SURFACE, 10, &scroller);
        controller.press(Point::new(195.0, 5.0), geo.as_ref(), &scroller);

        controller.drag_to(-500.0, geo.as_ref(), 10, &mut scroller);
        assert_eq!(scroller.offset(), 0.0);
        controller.drag_to(5_000.0, geo.as_ref(), 10, &mut scroller);
        assert_eq!(scroller.offset(), 130.0);
    }

    #[test]
    fn test_track_jump() {
        let controller = ScrollbarController::new();
        let mut scroller = scroller(5, 10);
        controller.track_jump(65.0, 130.0, 10, &mut scroller);
        assert_eq!(scroller.offset(), 65.0);

        controller.track_jump(104.0, 130.0, 10, &mut scroller);
        assert_eq!(scroller.offset(), 104.0);

        controller.track_jump(0.0, 130.0, 10, &mut scroller);
        assert_eq!(scroller.offset(), 0.0);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_on_huge_list_moves_by_whole_pixels() {
        // 2_000_000 rows of 26 px: the offset runs to about 5.2e7.
        let len = 2_000_000;
        let mut controller = ScrollbarController::new();
        let mut scroller = scroller(5, len);
        scroller.set_offset(40_000_001.0, len);
        let geo = controller.geometry(SURFACE, len, &scroller);
        let thumb = geo.map(|geo| geo.thumb).unwrap();
        assert!(thumb.top() > 0.0 && thumb.bottom() < SURFACE.height);

        let y = thumb.top() + 1.0;
        assert!(controller.press(Point::new(195.0, y), geo.as_ref(), &scroller));
        controller.drag_to(y, geo.as_ref(), len, &mut scroller);
        assert_eq!(scroller.offset(), 40_000_001.0);
    }
}
