//! Scroll offset management for the popup list.
//!
//! The viewport shows `visible_items` rows of `item_height` pixels each. The
//! scroll offset is kept within `[0, max_scroll]` where
//! `max_scroll = max(0, (len - visible_items) * item_height)`.

use std::ops::Range;

use crate::style::StyleSnapshot;

/// Owns the scroll offset, row height and visible row count.
///
/// The item count is not stored here; every operation that depends on it
/// takes `len` from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportScroller {
    offset: f64,
    item_height: f64,
    visible_items: usize,
}

impl ViewportScroller {
    /// Rows shown when nothing else is configured.
    pub const DEFAULT_VISIBLE_ITEMS: usize = 10;

    /// Create a scroller showing `visible_items` rows (at least one).
    pub fn new(visible_items: usize) -> Self {
        Self {
            offset: 0.0,
            item_height: f64::from(StyleSnapshot::DEFAULT_ITEM_HEIGHT),
            visible_items: visible_items.max(1),
        }
    }

    /// Current scroll offset in pixels.
    ///
    /// Held in `f64` so a single pixel still registers on lists with millions
    /// of rows; surface coordinates are narrowed to `f32` per row.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Height of one row in pixels.
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Number of rows the viewport shows.
    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    /// Change the visible row count (at least one) and re-clamp.
    pub fn set_visible_items(&mut self, visible_items: usize, len: usize) {
        self.visible_items = visible_items.max(1);
        self.clamp_to_content(len);
    }

    /// Height of the full viewport window in pixels.
    pub fn viewport_height(&self) -> f64 {
        self.visible_items as f64 * self.item_height
    }

    /// Largest valid offset for `len` items.
    pub fn max_scroll(&self, len: usize) -> f64 {
        len.saturating_sub(self.visible_items) as f64 * self.item_height
    }

    /// Whether `len` items overflow the viewport.
    pub fn is_scrollable(&self, len: usize) -> bool {
        len > self.visible_items
    }

    /// Prepare for a newly opened popup.
    ///
    /// Recomputes the row height from `style` and centers `selected` in the
    /// window as far as the content allows.
    pub fn open(&mut self, selected: i32, len: usize, style: &StyleSnapshot) {
        self.item_height = f64::from(style.item_height());

        let half = (self.visible_items >> 1) as i64;
        let last_start = len.saturating_sub(self.visible_items) as i64;
        let start_row = (i64::from(selected) - half).clamp(0, last_start);
        self.offset = start_row as f64 * self.item_height;

        tracing::debug!(
            target: "virtual_select::scroll",
            item_height = self.item_height,
            start_row,
            offset = self.offset,
            "viewport opened"
        );
    }

    /// Scroll by `delta` pixels, clamped to the content.
    pub fn scroll_by(&mut self, delta: f64, len: usize) {
        self.set_offset(self.offset + delta, len);
    }

    /// Jump to an absolute offset, clamped to the content.
    pub fn set_offset(&mut self, offset: f64, len: usize) {
        let max = self.max_scroll(len);
        let clamped = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, max)
        };
        if clamped != self.offset {
            tracing::trace!(target: "virtual_select::scroll", from = self.offset, to = clamped, "offset changed");
            self.offset = clamped;
        }
    }

    /// Re-clamp the offset after the item count changed.
    pub fn clamp_to_content(&mut self, len: usize) {
        self.set_offset(self.offset, len);
    }

    /// Scroll the minimum amount that brings row `index` fully into view.
    ///
    /// Out-of-range indices are ignored.
    pub fn ensure_visible(&mut self, index: i32, len: usize) {
        let Ok(row) = usize::try_from(index) else {
            return;
        };
        if row >= len {
            return;
        }

        let item_top = row as f64 * self.item_height;
        if self.offset > item_top {
            self.offset = item_top;
        } else {
            let item_bottom = item_top + self.item_height;
            let window = self.viewport_height();
            if self.offset + window < item_bottom {
                self.offset = item_bottom - window;
            }
        }
    }

    /// Rows that may intersect the viewport: `[floor(offset / h), start + visible + 1)`,
    /// capped at `len`.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = if self.item_height > 0.0 {
            (self.offset / self.item_height).floor() as usize
        } else {
            0
        };
        let end = start
            .saturating_add(self.visible_items)
            .saturating_add(1)
            .min(len);
        start.min(end)..end
    }

    /// The row under viewport-relative `y`, if any.
    pub fn index_at(&self, y: f64, len: usize) -> Option<usize> {
        if self.item_height <= 0.0 {
            return None;
        }
        let row = ((self.offset + y) / self.item_height).floor();
        if row >= 0.0 && (row as usize) < len {
            Some(row as usize)
        } else {
            None
        }
    }
}

impl Default for ViewportScroller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VISIBLE_ITEMS)
    }
}

static_assertions::assert_impl_all!(ViewportScroller: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(visible: usize, selected: i32, len: usize) -> ViewportScroller {
        let mut scroller = ViewportScroller::new(visible);
        scroller.open(selected, len, &StyleSnapshot::new());
        scroller
    }

    #[test]
    fn test_open_centers_selection() {
        // 10 items, 5 visible, selected 7: start row clamps to 5.
        let scroller = opened(5, 7, 10);
        assert_eq!(scroller.offset(), 5.0 * 26.0);

        let scroller = opened(5, 4, 10);
        assert_eq!(scroller.offset(), 2.0 * 26.0);
    }

    #[test]
    fn test_open_never_negative() {
        // Fewer items than visible rows.
        let scroller = opened(10, 2, 3);
        assert_eq!(scroller.offset(), 0.0);

        let scroller = opened(10, -1, 100);
        assert_eq!(scroller.offset(), 0.0);
    }

    #[test]
    fn test_open_uses_font_size() {
        let mut scroller = ViewportScroller::new(4);
        scroller.open(0, 10, &StyleSnapshot::new().with_font_size(20.0));
        assert_eq!(scroller.item_height(), 32.0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut scroller = opened(5, -1, 10);
        scroller.scroll_by(-40.0, 10);
        assert_eq!(scroller.offset(), 0.0);

        scroller.scroll_by(10_000.0, 10);
        assert_eq!(scroller.offset(), scroller.max_scroll(10));
        assert_eq!(scroller.max_scroll(10), 130.0);

        scroller.scroll_by(-30.0, 10);
        assert_eq!(scroller.offset(), 100.0);
    }

    #[test]
    fn test_no_scroll_when_content_fits() {
        let mut scroller = opened(10, -1, 4);
        scroller.scroll_by(50.0, 4);
        assert_eq!(scroller.offset(), 0.0);
        assert!(!scroller.is_scrollable(4));
    }

    #[test]
    fn test_ensure_visible_scrolls_up_or_down() {
        let mut scroller = opened(5, -1, 100);

        scroller.ensure_visible(9, 100);
        // Bottom of row 9 meets bottom of the window.
        assert_eq!(scroller.offset(), 10.0 * 26.0 - 5.0 * 26.0);

        scroller.ensure_visible(2, 100);
        assert_eq!(scroller.offset(), 2.0 * 26.0);

        // Already visible: no movement.
        scroller.ensure_visible(4, 100);
        assert_eq!(scroller.offset(), 2.0 * 26.0);
    }

    #[test]
    fn test_ensure_visible_ignores_out_of_range() {
        let mut scroller = opened(5, -1, 10);
        scroller.ensure_visible(-1, 10);
        scroller.ensure_visible(10, 10);
        assert_eq!(scroller.offset(), 0.0);
    }

    #[test]
    fn test_ensure_visible_then_range_contains() {
        let len = 250;
        let mut scroller = opened(7, 120, len);
        for index in [0, 3, 249, 17, 200, 6, 100] {
            scroller.ensure_visible(index, len);
            assert!(scroller.visible_range(len).contains(&(index as usize)));
        }
    }

    #[test]
    fn test_visible_range() {
        let mut scroller = opened(5, -1, 10);
        assert_eq!(scroller.visible_range(10), 0..6);

        scroller.set_offset(13.0, 10);
        assert_eq!(scroller.visible_range(10), 0..6);

        scroller.set_offset(130.0, 10);
        assert_eq!(scroller.visible_range(10), 5..10);

        assert_eq!(scroller.visible_range(0), 0..0);
    }

    #[test]
    fn test_clamp_to_content_after_shrink() {
        let mut scroller = opened(5, 90, 100);
        assert!(scroller.offset() > 0.0);
        scroller.clamp_to_content(3);
        assert_eq!(scroller.offset(), 0.0);
    }

    #[test]
    fn test_index_at() {
        let mut scroller = opened(5, -1, 10);
        scroller.set_offset(13.0, 10);
        assert_eq!(scroller.index_at(0.0, 10), Some(0));
        assert_eq!(scroller.index_at(13.0, 10), Some(1));
        assert_eq!(scroller.index_at(500.0, 10), None);
    }

    #[test]
    fn test_visible_items_at_least_one() {
        let scroller = ViewportScroller::new(0);
        assert_eq!(scroller.visible_items(), 1);
    }

    #[test]
    fn test_offset_invariant_over_mixed_operations() {
        let mut scroller = ViewportScroller::new(6);
        let mut len = 40;
        scroller.open(30, len, &StyleSnapshot::new());
        let steps: [(f64, usize); 6] = [
            (500.0, 40),
            (-75.5, 40),
            (9_999.0, 12),
            (-3.0, 12),
            (42.0, 0),
            (100.0, 7),
        ];
        for (delta, new_len) in steps {
            if new_len != len {
                len = new_len;
                scroller.clamp_to_content(len);
            }
            scroller.scroll_by(delta, len);
            scroller.ensure_visible((len as i32) - 1, len);
            assert!(scroller.offset() >= 0.0);
            assert!(scroller.offset() <= scroller.max_scroll(len));
        }
    }

    #[test]
    fn test_single_pixel_scroll_on_huge_list() {
        // 27 px rows put the offset past 4e7, where f32 steps are 4 px wide.
        let len = 2_000_000;
        let mut scroller = ViewportScroller::new(10);
        scroller.open(1_500_000, len, &StyleSnapshot::new().with_font_size(15.0));
        assert_eq!(scroller.item_height(), 27.0);

        let start = (1_500_000 - 5) as f64 * 27.0;
        assert_eq!(scroller.offset(), start);
        for step in 1..=10 {
            scroller.scroll_by(1.0, len);
            assert_eq!(scroller.offset(), start + f64::from(step));
        }
        assert_eq!(scroller.visible_range(len).start, 1_499_995);
        assert_eq!(scroller.index_at(0.0, len), Some(1_499_995));
        assert_eq!(scroller.index_at(17.0, len), Some(1_499_996));
    }
}
