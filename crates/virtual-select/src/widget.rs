//! The select widget: state machine, input routing and render scheduling.
//!
//! [`VirtualSelect`] owns a [`SelectionModel`], a [`ViewportScroller`], a
//! [`ScrollbarController`] and a [`RenderPlanner`], and talks to its
//! environment through a [`SelectHost`]. The host forwards raw input to the
//! public handler methods; every state change is followed by a synchronous
//! render of the narrowest affected [`RenderScope`].
//!
//! # Popup States
//!
//! ```text
//! Closed --show_drop_down--> Open --close_drop_down(save)--> Closed
//! ```
//!
//! While open, the highlighted row is a preview. It becomes the committed
//! value through [`VirtualSelect::select_item`] (Enter or a row click), and is
//! discarded when the popup closes without saving or focus leaves the widget.
//!
//! # Signals
//!
//! - `before_open`: emitted before the popup opens (advisory)
//! - `before_change(index)`: emitted before a commit; any slot may veto it
//! - `change(index)`: emitted after the committed index actually changed
//!
//! # Example
//!
//! ```ignore
//! use virtual_select::{VirtualSelect, KeyPressEvent, Key};
//!
//! let mut select = VirtualSelect::new(host)
//!     .with_items(vec!["Apple", "Banana", "Cherry"])
//!     .with_placeholder("Pick a fruit");
//!
//! select.change.connect(|&index| println!("committed {index}"));
//!
//! select.focus_in();
//! select.handle_key_press(&KeyPressEvent::key(Key::Enter));
//! ```

use std::fmt::{self, Display};

use virtual_select_core::logging::span_names;
use virtual_select_core::{PerfSpan, Signal, VetoSignal};
use virtual_select_render::Point;

use crate::config::{Palette, SelectConfig};
use crate::error::{SelectError, SelectResult};
use crate::events::{Key, KeyPressEvent, KeyResponse, PointerEvent, WheelEvent};
use crate::host::SelectHost;
use crate::model::SelectionModel;
use crate::planner::{RenderPlanner, RenderScope, RowPainter};
use crate::scrollbar::{ScrollbarController, ScrollbarHit};
use crate::scroller::ViewportScroller;

/// Callback run before the popup opens, typically to populate items lazily.
pub type OpenHook<T> = Box<dyn FnMut(&mut SelectionModel<T>) + Send>;

/// Whether the popup is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PopupState {
    /// Only the header is visible.
    #[default]
    Closed,
    /// The popup list is visible.
    Open,
}

// ============================================================================
// VirtualSelect
// ============================================================================

/// A single-select list widget that paints only its visible rows.
pub struct VirtualSelect<T, H> {
    model: SelectionModel<T>,
    scroller: ViewportScroller,
    scrollbar: ScrollbarController,
    planner: RenderPlanner<T>,
    host: H,
    state: PopupState,
    disabled: bool,
    focused: bool,
    /// Popup width override; `0` uses the anchor width.
    popup_width: f32,
    open_hook: Option<OpenHook<T>>,

    // Signals
    /// Signal emitted before the popup opens.
    pub before_open: Signal<()>,
    /// Signal emitted before a selection is committed. Any slot returning
    /// `false` cancels the commit.
    pub before_change: VetoSignal<i32>,
    /// Signal emitted after the committed index changed.
    pub change: Signal<i32>,
}

impl<T, H> fmt::Debug for VirtualSelect<T, H>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualSelect")
            .field("model", &self.model)
            .field("scroller", &self.scroller)
            .field("scrollbar", &self.scrollbar)
            .field("state", &self.state)
            .field("disabled", &self.disabled)
            .field("focused", &self.focused)
            .field("popup_width", &self.popup_width)
            .field("open_hook", &self.open_hook.is_some())
            .finish_non_exhaustive()
    }
}

impl<T, H> VirtualSelect<T, H>
where
    T: PartialEq + Display,
    H: SelectHost,
{
    /// Create an empty, closed widget and present its header.
    pub fn new(host: H) -> Self {
        let mut select = Self {
            model: SelectionModel::new(),
            scroller: ViewportScroller::default(),
            scrollbar: ScrollbarController::new(),
            planner: RenderPlanner::new(),
            host,
            state: PopupState::Closed,
            disabled: false,
            focused: false,
            popup_width: 0.0,
            open_hook: None,
            before_open: Signal::new(),
            before_change: VetoSignal::new(),
            change: Signal::new(),
        };
        select.render(RenderScope::Header);
        select
    }

    // =========================================================================
    // Items and Selection
    // =========================================================================

    /// The selection model.
    pub fn model(&self) -> &SelectionModel<T> {
        &self.model
    }

    /// The items, in display order.
    pub fn items(&self) -> &[T] {
        self.model.items()
    }

    /// Replace all items. Selections that no longer name a row are cleared.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.model.set_items(items);
        self.scroller.clamp_to_content(self.model.len());
        self.render(RenderScope::Full);
    }

    /// Set items using builder pattern.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.set_items(items);
        self
    }

    /// The highlighted row, or `-1`.
    pub fn selected_index(&self) -> i32 {
        self.model.selected_index()
    }

    /// The committed row, or `-1`.
    pub fn last_selected_index(&self) -> i32 {
        self.model.last_selected_index()
    }

    /// Select and commit `index` without notifying observers.
    ///
    /// Out-of-range values clear the selection.
    pub fn set_selected_index(&mut self, index: i32) {
        self.model.set_selected_index(index);
        self.render(RenderScope::Full);
    }

    /// Set the selected index using builder pattern.
    pub fn with_selected_index(mut self, index: i32) -> Self {
        self.set_selected_index(index);
        self
    }

    /// The highlighted item, if any.
    pub fn selected_value(&self) -> Option<&T> {
        self.model.selected_value()
    }

    /// Select and commit the first item equal to `value` without notifying
    /// observers, or clear the selection if there is none.
    pub fn set_selected_value(&mut self, value: &T) {
        self.model.set_selected_value(value);
        self.render(RenderScope::Full);
    }

    /// Commit `index` as the user's choice.
    ///
    /// Returns `false` if the index is invalid or a `before_change` slot
    /// vetoed the change.
    pub fn select_item(&mut self, index: i32) -> bool {
        match self.try_select_item(index) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(target: "virtual_select::interaction", %err, "selection refused");
                false
            }
        }
    }

    /// Commit `index` as the user's choice, reporting why it was refused.
    ///
    /// `-1` commits "no selection". On success the popup closes (keeping the
    /// choice) and `change` is emitted if the committed index changed.
    pub fn try_select_item(&mut self, index: i32) -> SelectResult<()> {
        if self.model.is_empty() && index != -1 {
            return Err(SelectError::EmptyItemSet);
        }
        self.model.check_index(index)?;

        if !self.before_change.emit(index) {
            return Err(SelectError::VetoedChange { index });
        }

        self.model.highlight(index)?;
        if self.is_open() {
            self.close_drop_down(true);
        } else {
            self.render(RenderScope::Header);
        }

        if self.model.commit() {
            tracing::debug!(target: "virtual_select::interaction", index, "selection committed");
            self.change.emit(index);
        }
        Ok(())
    }

    // =========================================================================
    // Popup Control
    // =========================================================================

    /// Current popup state.
    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Whether the popup is showing.
    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    /// Open the popup.
    ///
    /// Refused while already open or disabled. `before_open` is emitted and the
    /// open hook runs before any layout, so items supplied by the hook are
    /// measured and centered like any others. The hook only receives the
    /// model, so nothing is painted until the popup is actually open.
    pub fn show_drop_down(&mut self) -> bool {
        if self.is_open() || self.disabled {
            return false;
        }
        let _perf = PerfSpan::new(span_names::OPEN);

        self.before_open.emit(());
        if let Some(hook) = self.open_hook.as_mut() {
            hook(&mut self.model);
        }

        self.state = PopupState::Open;
        self.scrollbar.cancel();
        let style = self.host.style();
        self.scroller
            .open(self.model.selected_index(), self.model.len(), &style);

        tracing::debug!(
            target: "virtual_select::interaction",
            len = self.model.len(),
            selected = self.model.selected_index(),
            "popup opened"
        );
        self.render(RenderScope::Full);
        true
    }

    /// Close the popup, keeping the highlighted row if `save`, otherwise
    /// restoring the committed one.
    pub fn close_drop_down(&mut self, save: bool) {
        if !self.is_open() {
            return;
        }
        self.state = PopupState::Closed;
        self.scrollbar.cancel();
        if !save {
            self.model.revert();
        }
        tracing::debug!(
            target: "virtual_select::interaction",
            save,
            selected = self.model.selected_index(),
            "popup closed"
        );
        self.render(RenderScope::Full);
    }

    /// Open the popup if closed, else close it without saving.
    pub fn toggle_drop_down(&mut self) {
        if self.is_open() {
            self.close_drop_down(false);
        } else {
            self.show_drop_down();
        }
    }

    /// Install a callback that runs each time the popup is about to open.
    pub fn set_open_hook(&mut self, hook: impl FnMut(&mut SelectionModel<T>) + Send + 'static) {
        self.open_hook = Some(Box::new(hook));
    }

    /// Remove the open hook.
    pub fn clear_open_hook(&mut self) {
        self.open_hook = None;
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press routed from the host.
    ///
    /// Keys are ignored unless the widget is focused and enabled.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> KeyResponse {
        if !self.focused || self.disabled {
            return KeyResponse::Ignored;
        }

        match event.key {
            Key::ArrowDown => {
                self.step_highlight(1);
                KeyResponse::Consumed
            }
            Key::ArrowUp => {
                self.step_highlight(-1);
                KeyResponse::Consumed
            }
            Key::Enter => {
                if self.is_open() {
                    self.select_item(self.model.selected_index());
                } else {
                    self.show_drop_down();
                }
                KeyResponse::Consumed
            }
            Key::Space => {
                if !self.is_open() {
                    self.show_drop_down();
                }
                KeyResponse::Consumed
            }
            Key::Tab => {
                self.close_drop_down(false);
                KeyResponse::Ignored
            }
            Key::Escape => {
                if self.is_open() {
                    self.close_drop_down(false);
                    KeyResponse::Consumed
                } else {
                    KeyResponse::YieldFocus
                }
            }
            _ if self.is_open() => {
                if !event.is_repeat
                    && let Some(ch) = event.typed_char()
                {
                    self.jump_to_initial(ch);
                }
                KeyResponse::Consumed
            }
            _ => KeyResponse::Ignored,
        }
    }

    /// Move the highlight by `delta` rows. While closed the move is committed
    /// immediately; a vetoed commit puts the highlight back.
    fn step_highlight(&mut self, delta: i32) {
        let len = self.model.len();
        if len == 0 {
            tracing::trace!(
                target: "virtual_select::interaction",
                err = %SelectError::EmptyItemSet,
                "navigation ignored"
            );
            return;
        }

        let last = i32::try_from(len - 1).unwrap_or(i32::MAX);
        let next = self.model.selected_index().saturating_add(delta).clamp(0, last);
        if self.model.highlight(next).is_err() {
            return;
        }
        self.scroller.ensure_visible(next, len);

        if self.is_open() {
            self.render(RenderScope::Popup);
        } else if !self.select_item(next) {
            self.model.revert();
            self.render(RenderScope::Header);
        }
    }

    fn jump_to_initial(&mut self, ch: char) {
        let Some(index) = self.model.find_by_initial(ch) else {
            return;
        };
        let Ok(index) = i32::try_from(index) else {
            return;
        };
        if self.model.highlight(index).is_ok() {
            self.scroller.ensure_visible(index, self.model.len());
            tracing::trace!(target: "virtual_select::interaction", %ch, index, "jumped to initial");
            self.render(RenderScope::Popup);
        }
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// A click on the header toggles the popup.
    pub fn header_click(&mut self) {
        if self.disabled {
            return;
        }
        self.toggle_drop_down();
    }

    /// A button press on the popup surface. Returns `true` if it started a
    /// thumb drag.
    pub fn popup_press(&mut self, event: &PointerEvent) -> bool {
        self.scrollbar.end_drag_session();
        if !self.is_open() || !event.is_primary() {
            return false;
        }

        let len = self.model.len();
        if !self.scroller.is_scrollable(len) {
            return false;
        }
        let size = self.host.surface().size();
        let geometry = self.scrollbar.geometry(size, len, &self.scroller);
        self.scrollbar
            .press(event.local_pos, geometry.as_ref(), &self.scroller)
    }

    /// Pointer movement anywhere, in popup-surface coordinates. Returns `true`
    /// if a thumb drag consumed it.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if !self.scrollbar.is_dragging() {
            return false;
        }
        let len = self.model.len();
        let size = self.host.surface().size();
        let geometry = self.scrollbar.geometry(size, len, &self.scroller);
        self.scrollbar
            .drag_to(pos.y, geometry.as_ref(), len, &mut self.scroller);
        self.render(RenderScope::Popup);
        true
    }

    /// A button release anywhere. Returns `true` if it ended a thumb drag.
    ///
    /// The click that completes the same gesture is still suppressed; call
    /// [`end_drag_session`](Self::end_drag_session) once it has been
    /// dispatched.
    pub fn pointer_release(&mut self) -> bool {
        self.scrollbar.release()
    }

    /// A click on the popup surface. Returns `true` if it scrolled or
    /// committed a row.
    ///
    /// A click on the scrollbar band jumps the track. Any other click commits
    /// the row under the pointer. A click that completes a thumb drag does
    /// neither and ends the drag session.
    pub fn popup_click(&mut self, event: &PointerEvent) -> bool {
        if !self.is_open() || !event.is_primary() {
            return false;
        }
        if self.scrollbar.suppresses_click() {
            self.scrollbar.end_drag_session();
            return false;
        }

        let len = self.model.len();
        let pos = event.local_pos;
        let size = self.host.surface().size();
        let geometry = self.scrollbar.geometry(size, len, &self.scroller);

        if ScrollbarController::hit_test(geometry.as_ref(), pos) != ScrollbarHit::None {
            self.scrollbar
                .track_jump(pos.y, size.height, len, &mut self.scroller);
            self.render(RenderScope::Popup);
            return true;
        }

        match self.scroller.index_at(f64::from(pos.y), len) {
            Some(index) => i32::try_from(index).is_ok_and(|index| self.select_item(index)),
            None => false,
        }
    }

    /// Wheel input over the popup. Returns `true` if the popup consumed it.
    pub fn wheel(&mut self, event: &WheelEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        self.scroller.scroll_by(f64::from(event.delta_y), self.model.len());
        self.render(RenderScope::Popup);
        true
    }

    /// A press outside both the header and the popup closes without saving.
    pub fn outside_press(&mut self) {
        self.close_drop_down(false);
    }

    /// Finish a released thumb drag after its click has been dispatched.
    pub fn end_drag_session(&mut self) {
        self.scrollbar.end_drag_session();
    }

    /// Called by hosts once at the end of every input dispatch cycle.
    pub fn end_dispatch_cycle(&mut self) {
        self.end_drag_session();
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether the widget has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The widget gained keyboard focus.
    pub fn focus_in(&mut self) {
        self.focused = true;
    }

    /// The widget lost keyboard focus. An uncommitted highlight is discarded;
    /// an open popup stays open.
    pub fn focus_out(&mut self) {
        self.focused = false;
        if self.model.revert() {
            self.render(RenderScope::Full);
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Header text when nothing is selected.
    pub fn placeholder(&self) -> &str {
        self.model.placeholder()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        if self.model.set_placeholder(placeholder) {
            self.render(RenderScope::Header);
        }
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    /// Whether the widget is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the widget. A disabled widget refuses to open and
    /// ignores keyboard and header input.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.render(RenderScope::Header);
        }
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Rows shown in the popup at once.
    pub fn visible_items(&self) -> usize {
        self.scroller.visible_items()
    }

    /// Set the number of rows shown at once (at least one).
    pub fn set_visible_items(&mut self, visible_items: usize) {
        self.scroller
            .set_visible_items(visible_items, self.model.len());
        self.render(RenderScope::Full);
    }

    /// Set the visible row count using builder pattern.
    pub fn with_visible_items(mut self, visible_items: usize) -> Self {
        self.set_visible_items(visible_items);
        self
    }

    /// Popup width override; `0` uses the anchor width.
    pub fn popup_width(&self) -> f32 {
        self.popup_width
    }

    /// Set the popup width override. Non-positive values use the anchor width.
    pub fn set_popup_width(&mut self, width: f32) {
        self.popup_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.render(RenderScope::Full);
    }

    /// Set the popup width override using builder pattern.
    pub fn with_popup_width(mut self, width: f32) -> Self {
        self.set_popup_width(width);
        self
    }

    /// Colors used to paint the popup.
    pub fn palette(&self) -> &Palette {
        self.planner.palette()
    }

    /// Replace the popup colors.
    pub fn set_palette(&mut self, palette: Palette) {
        self.planner.set_palette(palette);
        self.render(RenderScope::Popup);
    }

    /// Apply every setting from `config`.
    pub fn apply_config(&mut self, config: &SelectConfig) {
        self.model.set_placeholder(config.placeholder.clone());
        self.disabled = config.disabled;
        self.popup_width = config.popup_width.max(0.0);
        self.scroller
            .set_visible_items(config.visible_items, self.model.len());
        self.scrollbar.set_min_thumb_height(config.min_thumb_height);
        self.planner.set_palette(config.palette);
        self.render(RenderScope::Full);
    }

    /// Apply a configuration using builder pattern.
    pub fn with_config(mut self, config: &SelectConfig) -> Self {
        self.apply_config(config);
        self
    }

    /// Register a custom row painter.
    pub fn add_row_painter(&mut self, painter: impl RowPainter<T> + 'static) {
        self.planner.add_row_painter(painter);
        self.render(RenderScope::Popup);
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// The scroll state.
    pub fn scroller(&self) -> &ViewportScroller {
        &self.scroller
    }

    /// The scrollbar state.
    pub fn scrollbar(&self) -> &ScrollbarController {
        &self.scrollbar
    }

    /// The render planner.
    pub fn planner(&self) -> &RenderPlanner<T> {
        &self.planner
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Repaint `scope`.
    ///
    /// The header reflects the selection, arrow and disabled flag. A `Full`
    /// render while open also lays out the popup (size, side, patch width)
    /// before painting; while closed it hides the popup.
    pub fn render(&mut self, scope: RenderScope) {
        let open = self.is_open();

        if matches!(scope, RenderScope::Header | RenderScope::Full) {
            let header = self.planner.header_view(&self.model, open, self.disabled);
            self.host.update_header(&header);
        }

        if !open {
            if scope == RenderScope::Full {
                self.host.set_popup(None);
            }
            return;
        }
        if scope == RenderScope::Header {
            return;
        }

        let style = self.host.style();
        if scope == RenderScope::Full {
            let anchor = self.host.anchor_rect();
            let space = (self.host.space_above(), self.host.space_below());
            let layout = self.planner.popup_layout(
                self.model.len(),
                &self.scroller,
                &style,
                anchor.width(),
                self.popup_width,
                space,
            );
            self.host.surface().resize(layout.size);
            self.host.set_popup(Some(&layout));
        }

        let surface = self.host.surface();
        self.planner.paint_popup(
            surface,
            &self.model,
            &self.scroller,
            &self.scrollbar,
            &style,
        );
    }
}
