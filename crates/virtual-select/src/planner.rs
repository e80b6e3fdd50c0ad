//! Render planning: what to paint, where, and how much of each label fits.
//!
//! [`RenderPlanner`] turns the current model, scroll and scrollbar state into
//! drawing calls on a [`DrawingSurface`]. Only rows in the viewport's visible
//! range are considered, and rows that fall entirely outside the surface are
//! skipped, so painting cost is independent of the item count.
//!
//! Row painting can be taken over per row by registered [`RowPainter`]s.

use std::borrow::Cow;
use std::fmt::{self, Display};

use unicode_segmentation::UnicodeSegmentation;
use virtual_select_core::PerfSpan;
use virtual_select_core::logging::span_names;
use virtual_select_render::{Color, DrawingSurface, Point, Rect, Size};

use crate::config::Palette;
use crate::error::SelectError;
use crate::host::{ArrowDirection, HeaderView, PopupLayout, PopupSide};
use crate::model::SelectionModel;
use crate::scrollbar::ScrollbarController;
use crate::scroller::ViewportScroller;
use crate::style::StyleSnapshot;

/// Appended to labels that had to be shortened.
pub const ELLIPSIS: &str = "\u{2026}";

/// Horizontal inset of row text from the left edge.
pub const TEXT_INSET: f32 = 6.0;

/// Total horizontal room reserved around row text.
pub const TEXT_MARGIN: f32 = 8.0;

/// Smallest popup height used when neither side has enough room.
pub const MIN_POPUP_HEIGHT: f32 = 20.0;

// Truncation works in chunks before trimming one grapheme at a time.
const COARSE_THRESHOLD: usize = 100;
const COARSE_CHUNK: usize = 50;

// ============================================================================
// Render Scope
// ============================================================================

/// How much of the widget a state change needs to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderScope {
    /// Only the header (selected text, arrow, disabled flag).
    Header,
    /// Only the popup list contents, without re-laying it out.
    ///
    /// Also the scope for scroll offset changes: every row moves with the
    /// offset, so the thumb is never repainted on its own.
    Popup,
    /// Header, popup layout, and popup contents.
    Full,
}

// ============================================================================
// Row Painters
// ============================================================================

/// Outcome of offering a row to a [`RowPainter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaintDisposition {
    /// Let the default label be drawn.
    #[default]
    Default,
    /// The painter drew the row's content; skip the default label.
    Handled,
}

/// Everything a painter needs to know about one row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a, T> {
    /// Item index.
    pub index: usize,
    /// The item.
    pub value: &'a T,
    /// Row bounds on the surface.
    pub bounds: Rect,
    /// Whether this row is the highlighted one.
    pub selected: bool,
    /// Text color the default label would use.
    pub text_color: Color,
}

/// Custom row content.
///
/// Every registered painter is offered every painted row, after the row's
/// selection background and before its separator. If any painter reports
/// [`PaintDisposition::Handled`], the default label is not drawn.
///
/// Closures with the matching signature implement this trait.
pub trait RowPainter<T>: Send + Sync {
    /// Paint row content, or decline by returning [`PaintDisposition::Default`].
    fn paint_row(&self, row: &RowContext<'_, T>, surface: &mut dyn DrawingSurface)
    -> PaintDisposition;
}

impl<T, F> RowPainter<T> for F
where
    F: Fn(&RowContext<'_, T>, &mut dyn DrawingSurface) -> PaintDisposition + Send + Sync,
{
    fn paint_row(
        &self,
        row: &RowContext<'_, T>,
        surface: &mut dyn DrawingSurface,
    ) -> PaintDisposition {
        self(row, surface)
    }
}

// ============================================================================
// Layout Helpers
// ============================================================================

/// Where the popup goes and how tall it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    /// Side of the anchor.
    pub side: PopupSide,
    /// Popup height in pixels.
    pub height: f32,
}

/// Decide which side of the anchor the popup opens on.
///
/// Below wins if the full `desired` height fits there, then above. If neither
/// fits, the roomier side is used (ties go below) with its available space
/// floored, but never less than [`MIN_POPUP_HEIGHT`].
pub fn place_popup(desired: f32, space_above: f32, space_below: f32) -> PopupPlacement {
    if space_below >= desired {
        return PopupPlacement {
            side: PopupSide::Below,
            height: desired,
        };
    }
    if space_above >= desired {
        return PopupPlacement {
            side: PopupSide::Above,
            height: desired,
        };
    }

    let (side, space) = if space_below >= space_above {
        (PopupSide::Below, space_below)
    } else {
        (PopupSide::Above, space_above)
    };
    let floored = space.floor();
    if floored < MIN_POPUP_HEIGHT {
        tracing::debug!(
            target: "virtual_select::render",
            error = %SelectError::DegenerateLayout,
            space_above,
            space_below,
            "using minimum popup height"
        );
    }
    PopupPlacement {
        side,
        height: floored.max(MIN_POPUP_HEIGHT),
    }
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
///
/// Labels that already fit are returned unchanged. Long labels are first cut
/// in chunks of 50 grapheme clusters while longer than 100 clusters and too
/// wide; if that removed anything, up to 50 clusters are restored once. Then
/// one cluster at a time is removed while more than one remains and the
/// label plus ellipsis is still too wide.
pub fn truncate_label<'a>(
    surface: &dyn DrawingSurface,
    text: &'a str,
    max_width: f32,
) -> Cow<'a, str> {
    if surface.measure_text_width(text) <= max_width {
        return Cow::Borrowed(text);
    }

    // Byte offset of every cluster boundary, including the end.
    let bounds: Vec<usize> = text
        .grapheme_indices(true)
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = bounds.len() - 1;
    let prefix = |clusters: usize| &text[..bounds[clusters]];

    let mut keep = total;
    while keep > COARSE_THRESHOLD && surface.measure_text_width(prefix(keep)) > max_width {
        keep -= COARSE_CHUNK;
    }
    if keep < total {
        keep = (keep + COARSE_CHUNK).min(total);
    }

    let mut candidate = String::with_capacity(text.len() + ELLIPSIS.len());
    loop {
        keep = keep.saturating_sub(1);
        candidate.clear();
        candidate.push_str(prefix(keep));
        candidate.push_str(ELLIPSIS);
        if keep <= 1 || surface.measure_text_width(&candidate) <= max_width {
            break;
        }
    }

    tracing::trace!(target: "virtual_select::render", kept = keep, total, "label truncated");
    Cow::Owned(candidate)
}

// ============================================================================
// Render Planner
// ============================================================================

/// Plans and paints the header view and the popup list.
pub struct RenderPlanner<T> {
    palette: Palette,
    painters: Vec<Box<dyn RowPainter<T>>>,
}

impl<T> fmt::Debug for RenderPlanner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPlanner")
            .field("palette", &self.palette)
            .field("painters", &self.painters.len())
            .finish()
    }
}

impl<T> Default for RenderPlanner<T> {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            painters: Vec::new(),
        }
    }
}

impl<T: PartialEq + Display> RenderPlanner<T> {
    /// Create a planner with the default palette and no row painters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the palette using builder pattern.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// The colors used for selection, separators and the thumb.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Register a row painter. Painters are consulted in registration order.
    pub fn add_row_painter(&mut self, painter: impl RowPainter<T> + 'static) {
        self.painters.push(Box::new(painter));
    }

    /// Remove all row painters.
    pub fn clear_row_painters(&mut self) {
        self.painters.clear();
    }

    /// Number of registered row painters.
    pub fn row_painter_count(&self) -> usize {
        self.painters.len()
    }

    /// What the header shows for the current state.
    ///
    /// The placeholder is used when nothing is selected or the selected item's
    /// text is empty.
    pub fn header_view(&self, model: &SelectionModel<T>, open: bool, disabled: bool) -> HeaderView {
        let (text, is_placeholder) = match model.selected_text() {
            Some(text) if !text.is_empty() => (text, false),
            _ => (model.placeholder().to_string(), true),
        };
        HeaderView {
            text,
            is_placeholder,
            arrow: if open {
                ArrowDirection::Up
            } else {
                ArrowDirection::Down
            },
            disabled,
        }
    }

    /// Size and side of the popup.
    ///
    /// The desired height shows between one and `visible_items` rows. The width
    /// is `width_override` when positive, else the anchor width. The last
    /// argument is the room above and below the anchor.
    pub fn popup_layout(
        &self,
        len: usize,
        scroller: &ViewportScroller,
        style: &StyleSnapshot,
        anchor_width: f32,
        width_override: f32,
        (space_above, space_below): (f32, f32),
    ) -> PopupLayout {
        let rows = len.clamp(1, scroller.visible_items());
        let desired = (scroller.item_height() * rows as f64) as f32;
        let placement = place_popup(desired, space_above, space_below);

        let width = if width_override > 0.0 {
            width_override
        } else {
            anchor_width
        };
        let patch_width = style.width.map_or(width, |w| w.min(width));

        PopupLayout {
            side: placement.side,
            size: Size::new(width, placement.height),
            patch_width,
        }
    }

    /// Paint the popup list onto `surface` at its current size.
    pub fn paint_popup(
        &self,
        surface: &mut dyn DrawingSurface,
        model: &SelectionModel<T>,
        scroller: &ViewportScroller,
        scrollbar: &ScrollbarController,
        style: &StyleSnapshot,
    ) {
        let _perf = PerfSpan::new(span_names::RENDER);

        let size = surface.size();
        let full = Rect::from_size(size);
        surface.clear(full);
        surface.fill_rect(full, style.background.unwrap_or(self.palette.background));

        let len = model.len();
        let row_height = scroller.item_height();
        let h = row_height as f32;
        let range = scroller.visible_range(len);
        tracing::trace!(
            target: "virtual_select::render",
            start = range.start,
            end = range.end,
            offset = scroller.offset(),
            "painting popup"
        );

        surface.set_font(&style.font());
        let selected = usize::try_from(model.selected_index()).ok();

        for index in range {
            let y = (index as f64 * row_height - scroller.offset()) as f32;
            let bounds = Rect::new(0.0, y, size.width, h);
            if !full.intersects(&bounds) {
                continue;
            }
            let Some(value) = model.item(index) else {
                continue;
            };

            let is_selected = selected == Some(index);
            let text_color = if is_selected {
                surface.fill_rect(
                    Rect::new(0.0, y, size.width, h - 1.0),
                    self.palette.selection_background,
                );
                self.palette.selection_text
            } else {
                style.foreground
            };

            let row = RowContext {
                index,
                value,
                bounds,
                selected: is_selected,
                text_color,
            };
            let mut handled = false;
            for painter in &self.painters {
                if painter.paint_row(&row, surface) == PaintDisposition::Handled {
                    handled = true;
                }
            }

            if !handled {
                let text = value.to_string();
                let label = truncate_label(surface, &text, size.width - TEXT_MARGIN);
                surface.draw_text(&label, Point::new(TEXT_INSET, y + h / 2.0), text_color);
            }

            let separator_y = y + h - 0.5;
            surface.stroke_line(
                Point::new(0.0, separator_y),
                Point::new(size.width, separator_y),
                self.palette.separator,
            );
        }

        if let Some(geometry) = scrollbar.geometry(size, len, scroller) {
            surface.fill_rect(geometry.thumb_paint_rect(), self.palette.thumb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtual_select_render::{DrawCommand, RecordingSurface};

    fn surface(width: f32, height: f32, char_width: f32) -> RecordingSurface {
        RecordingSurface::new(Size::new(width, height)).with_char_width(char_width)
    }

    // ------------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------------

    #[test]
    fn test_place_below_when_it_fits() {
        let p = place_popup(260.0, 500.0, 300.0);
        assert_eq!(p.side, PopupSide::Below);
        assert_eq!(p.height, 260.0);
    }

    #[test]
    fn test_place_above_when_only_above_fits() {
        let p = place_popup(260.0, 300.0, 100.0);
        assert_eq!(p.side, PopupSide::Above);
        assert_eq!(p.height, 260.0);
    }

    #[test]
    fn test_place_roomier_side_when_neither_fits() {
        let p = place_popup(260.0, 120.7, 90.0);
        assert_eq!(p.side, PopupSide::Above);
        assert_eq!(p.height, 120.0);

        // Ties go below.
        let p = place_popup(260.0, 100.0, 100.0);
        assert_eq!(p.side, PopupSide::Below);
        assert_eq!(p.height, 100.0);
    }

    #[test]
    fn test_place_minimum_height() {
        let p = place_popup(260.0, 5.0, 12.0);
        assert_eq!(p.side, PopupSide::Below);
        assert_eq!(p.height, MIN_POPUP_HEIGHT);

        let p = place_popup(260.0, -40.0, -10.0);
        assert_eq!(p.height, MIN_POPUP_HEIGHT);
    }

    // ------------------------------------------------------------------------
    // Truncation
    // ------------------------------------------------------------------------

    #[test]
    fn test_truncate_fitting_label_is_unchanged() {
        let s = surface(200.0, 26.0, 10.0);
        let label = truncate_label(&s, "short", 100.0);
        assert!(matches!(label, Cow::Borrowed("short")));
        // Idempotent on its own output.
        let again = truncate_label(&s, &label, 100.0);
        assert_eq!(again, label);
    }

    #[test]
    fn test_truncate_long_label() {
        let s = surface(200.0, 26.0, 10.0);
        let text = "x".repeat(50);
        let label = truncate_label(&s, &text, 100.0);
        assert!(label.ends_with(ELLIPSIS));
        assert!(s.measure_text_width(&label) <= 100.0);
        assert_eq!(label, format!("{}{}", "x".repeat(9), ELLIPSIS));
    }

    #[test]
    fn test_truncate_very_long_label_uses_coarse_cuts() {
        let s = surface(200.0, 26.0, 1.0);
        let text = "y".repeat(5_000);
        let label = truncate_label(&s, &text, 80.0);
        assert_eq!(label.chars().count(), 80);
        assert!(label.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_keeps_grapheme_clusters_whole() {
        let s = surface(200.0, 26.0, 10.0);
        let text = "e\u{301}".repeat(20);
        let label = truncate_label(&s, &text, 60.0);
        assert!(label.ends_with(ELLIPSIS));
        let body = label.trim_end_matches(ELLIPSIS);
        assert_eq!(body, "e\u{301}".repeat(5));
    }

    #[test]
    fn test_truncate_never_below_one_cluster() {
        let s = surface(200.0, 26.0, 50.0);
        let label = truncate_label(&s, "abcdef", 10.0);
        assert_eq!(label, format!("a{ELLIPSIS}"));

        let label = truncate_label(&s, "W", 10.0);
        assert_eq!(label, ELLIPSIS);
    }

    // ------------------------------------------------------------------------
    // Header
    // ------------------------------------------------------------------------

    #[test]
    fn test_header_view() {
        let planner = RenderPlanner::<String>::new();
        let mut model = SelectionModel::new()
            .with_items(vec!["One".to_string(), String::new()])
            .with_placeholder("Choose...");

        let header = planner.header_view(&model, false, false);
        assert_eq!(header.text, "Choose...");
        assert!(header.is_placeholder);
        assert_eq!(header.arrow, ArrowDirection::Down);

        model.set_selected_index(0);
        let header = planner.header_view(&model, true, true);
        assert_eq!(header.text, "One");
        assert!(!header.is_placeholder);
        assert_eq!(header.arrow, ArrowDirection::Up);
        assert!(header.disabled);

        // Empty label falls back to the placeholder.
        model.set_selected_index(1);
        assert!(planner.header_view(&model, false, false).is_placeholder);
    }

    // ------------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------------

    fn numbers(len: usize) -> SelectionModel<usize> {
        SelectionModel::new().with_items((0..len).collect())
    }

    #[test]
    fn test_popup_layout() {
        let planner = RenderPlanner::<usize>::new();
        let mut scroller = ViewportScroller::new(5);
        scroller.open(-1, 3, &StyleSnapshot::new());
        let style = StyleSnapshot::new().with_width(150.0);

        let layout = planner.popup_layout(3, &scroller, &style, 200.0, 0.0, (0.0, 500.0));
        assert_eq!(layout.size, Size::new(200.0, 78.0));
        assert_eq!(layout.side, PopupSide::Below);
        assert_eq!(layout.patch_width, 150.0);

        // Empty list still gets one row; width override wins.
        let layout = planner.popup_layout(0, &scroller, &style, 200.0, 320.0, (0.0, 500.0));
        assert_eq!(layout.size, Size::new(320.0, 26.0));
    }

    #[test]
    fn test_paint_only_visible_rows() {
        let planner = RenderPlanner::new();
        let model = numbers(10_000);
        let mut scroller = ViewportScroller::new(5);
        scroller.open(5_000, model.len(), &StyleSnapshot::new());
        let scrollbar = ScrollbarController::new();
        let mut s = surface(200.0, 130.0, 8.0);

        planner.paint_popup(&mut s, &model, &scroller, &scrollbar, &StyleSnapshot::new());

        // Row 5003 starts exactly at the bottom edge and is skipped.
        let texts = s.drawn_texts();
        assert_eq!(texts, vec!["4998", "4999", "5000", "5001", "5002"]);
        assert_eq!(s.fills_of(Color::THUMB_SHADE).len(), 1);
    }

    #[test]
    fn test_paint_huge_list_after_single_pixel_scroll() {
        let planner = RenderPlanner::new();
        let model = numbers(2_000_000);
        let mut scroller = ViewportScroller::new(5);
        scroller.open(1_500_000, model.len(), &StyleSnapshot::new());
        scroller.scroll_by(1.0, model.len());
        let mut s = surface(200.0, 130.0, 8.0);

        planner.paint_popup(
            &mut s,
            &model,
            &scroller,
            &ScrollbarController::new(),
            &StyleSnapshot::new(),
        );

        // The first row is shifted up by exactly one pixel; the sixth peeks in.
        assert!(s.commands().contains(&DrawCommand::Text {
            text: "1499998".to_string(),
            origin: Point::new(6.0, 12.0),
            color: Color::BLACK,
        }));
        assert_eq!(s.drawn_texts().len(), 6);
        assert_eq!(s.drawn_texts().last(), Some(&"1500003"));
    }

    #[test]
    fn test_paint_selected_row() {
        let planner = RenderPlanner::new();
        let mut model = numbers(3);
        model.set_selected_index(1);
        let mut scroller = ViewportScroller::new(5);
        scroller.open(1, 3, &StyleSnapshot::new());
        let mut s = surface(120.0, 78.0, 8.0);

        planner.paint_popup(
            &mut s,
            &model,
            &scroller,
            &ScrollbarController::new(),
            &StyleSnapshot::new(),
        );

        assert_eq!(
            s.fills_of(Color::ROYAL_BLUE),
            vec![Rect::new(0.0, 26.0, 120.0, 25.0)]
        );
        assert!(s.commands().contains(&DrawCommand::Text {
            text: "1".to_string(),
            origin: Point::new(6.0, 39.0),
            color: Color::WHITE,
        }));
        assert_eq!(s.line_count(), 3);
        // Content fits: no thumb.
        assert!(s.fills_of(Color::THUMB_SHADE).is_empty());
    }

    #[test]
    fn test_row_painter_suppresses_default_label() {
        let mut planner = RenderPlanner::new();
        planner.add_row_painter(
            |row: &RowContext<'_, usize>, surface: &mut dyn DrawingSurface| {
                if *row.value == 0 {
                    surface.draw_text("zero", row.bounds.origin, row.text_color);
                    PaintDisposition::Handled
                } else {
                    PaintDisposition::Default
                }
            },
        );
        planner.add_row_painter(|_: &RowContext<'_, usize>, _: &mut dyn DrawingSurface| {
            PaintDisposition::Default
        });
        assert_eq!(planner.row_painter_count(), 2);

        let model = numbers(2);
        let mut scroller = ViewportScroller::new(5);
        scroller.open(-1, 2, &StyleSnapshot::new());
        let mut s = surface(120.0, 52.0, 8.0);
        planner.paint_popup(
            &mut s,
            &model,
            &scroller,
            &ScrollbarController::new(),
            &StyleSnapshot::new(),
        );

        assert_eq!(s.drawn_texts(), vec!["zero", "1"]);
        // Separators are still drawn for handled rows.
        assert_eq!(s.line_count(), 2);
    }
}
