//! Item list and selection state.
//!
//! [`SelectionModel`] owns the items and two indices:
//!
//! - the *selected* index, the row currently highlighted (possibly a preview
//!   the user has not committed yet)
//! - the *last selected* index, the committed value
//!
//! Both are `-1` when nothing is selected, and the selected index is always
//! either `-1` or a valid row.

use std::fmt::Display;

use crate::error::{SelectError, SelectResult};

/// Owns the item list, the selection, and the placeholder text.
///
/// # Example
///
/// ```
/// use virtual_select::SelectionModel;
///
/// let mut model = SelectionModel::new().with_items(vec!["Apple", "Banana", "Cherry"]);
/// model.set_selected_value(&"Banana");
/// assert_eq!(model.selected_index(), 1);
/// assert_eq!(model.selected_value(), Some(&"Banana"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionModel<T> {
    items: Vec<T>,
    selected: i32,
    last_selected: i32,
    placeholder: String,
}

impl<T> Default for SelectionModel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: -1,
            last_selected: -1,
            placeholder: String::new(),
        }
    }
}

impl<T: PartialEq + Display> SelectionModel<T> {
    /// Create an empty model with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set items using builder pattern.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.set_items(items);
        self
    }

    /// Set placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// The items, in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if in range.
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Replace all items.
    ///
    /// If the selected index no longer names a row, it and the committed index
    /// both become `-1`. Otherwise the committed index is cleared only when it
    /// is out of range itself.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if !self.is_valid_row(self.selected) {
            self.selected = -1;
            self.last_selected = -1;
        } else if !self.is_valid_row(self.last_selected) {
            self.last_selected = -1;
        }
        tracing::debug!(
            target: "virtual_select::selection",
            len = self.items.len(),
            selected = self.selected,
            last_selected = self.last_selected,
            "items replaced"
        );
    }

    /// Index of the first item equal to `value`, or `-1`.
    pub fn index_of(&self, value: &T) -> i32 {
        self.items
            .iter()
            .position(|item| item == value)
            .map_or(-1, |i| i as i32)
    }

    /// Index of the first item whose text starts with `ch`, ignoring case.
    pub fn find_by_initial(&self, ch: char) -> Option<usize> {
        self.items.iter().position(|item| {
            item.to_string()
                .chars()
                .next()
                .is_some_and(|first| first.to_lowercase().eq(ch.to_lowercase()))
        })
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The highlighted row, or `-1`.
    pub fn selected_index(&self) -> i32 {
        self.selected
    }

    /// The committed row, or `-1`.
    pub fn last_selected_index(&self) -> i32 {
        self.last_selected
    }

    /// Whether the highlighted row differs from the committed one.
    pub fn has_uncommitted_preview(&self) -> bool {
        self.selected != self.last_selected
    }

    /// Select and commit `index`.
    ///
    /// Out-of-range values clear the selection to `-1`.
    pub fn set_selected_index(&mut self, index: i32) {
        if let Err(err) = self.try_set_selected_index(index) {
            tracing::debug!(target: "virtual_select::selection", %err, "clearing selection");
            self.selected = -1;
            self.last_selected = -1;
        }
    }

    /// Select and commit `index`, failing without changes when it is out of range.
    pub fn try_set_selected_index(&mut self, index: i32) -> SelectResult<()> {
        self.check_index(index)?;
        self.selected = index;
        self.last_selected = index;
        Ok(())
    }

    /// The highlighted item, if any.
    pub fn selected_value(&self) -> Option<&T> {
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.items.get(i))
    }

    /// Select and commit the first item equal to `value`, or clear the selection.
    pub fn set_selected_value(&mut self, value: &T) {
        let index = self.index_of(value);
        self.set_selected_index(index);
    }

    /// Text of the highlighted item, if any.
    pub fn selected_text(&self) -> Option<String> {
        self.selected_value().map(ToString::to_string)
    }

    /// Move the highlight without committing it.
    pub(crate) fn highlight(&mut self, index: i32) -> SelectResult<()> {
        self.check_index(index)?;
        self.selected = index;
        Ok(())
    }

    /// Commit the highlight. Returns `true` if the committed index changed.
    pub(crate) fn commit(&mut self) -> bool {
        if self.selected == self.last_selected {
            return false;
        }
        self.last_selected = self.selected;
        true
    }

    /// Discard the highlight. Returns `true` if anything changed.
    pub(crate) fn revert(&mut self) -> bool {
        if self.selected == self.last_selected {
            return false;
        }
        self.selected = self.last_selected;
        true
    }

    /// Check that `index` is `-1` or a valid row.
    pub fn check_index(&self, index: i32) -> SelectResult<()> {
        if index == -1 || self.is_valid_row(index) {
            Ok(())
        } else {
            Err(SelectError::InvalidIndex {
                index,
                len: self.items.len(),
            })
        }
    }

    fn is_valid_row(&self, index: i32) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.items.len())
    }

    // =========================================================================
    // Placeholder
    // =========================================================================

    /// Text shown in the header when nothing is selected.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Set the placeholder. Returns `true` if it changed.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> bool {
        let placeholder = placeholder.into();
        if placeholder == self.placeholder {
            return false;
        }
        self.placeholder = placeholder;
        true
    }
}

static_assertions::assert_impl_all!(SelectionModel<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> SelectionModel<&'static str> {
        SelectionModel::new().with_items(vec!["Apple", "banana", "Cherry", "avocado"])
    }

    #[test]
    fn test_model_creation() {
        let model = SelectionModel::<String>::new();
        assert!(model.is_empty());
        assert_eq!(model.selected_index(), -1);
        assert_eq!(model.last_selected_index(), -1);
        assert_eq!(model.placeholder(), "");
        assert!(model.selected_value().is_none());
    }

    #[test]
    fn test_set_selected_index() {
        let mut model = fruits();
        model.set_selected_index(2);
        assert_eq!(model.selected_index(), 2);
        assert_eq!(model.last_selected_index(), 2);
        assert_eq!(model.selected_text().as_deref(), Some("Cherry"));

        // Out of bounds should reset to -1
        model.set_selected_index(10);
        assert_eq!(model.selected_index(), -1);
        assert_eq!(model.last_selected_index(), -1);

        // Negative should be -1
        model.set_selected_index(2);
        model.set_selected_index(-5);
        assert_eq!(model.selected_index(), -1);
    }

    #[test]
    fn test_try_set_selected_index() {
        let mut model = fruits();
        model.set_selected_index(1);
        assert_eq!(
            model.try_set_selected_index(4),
            Err(SelectError::InvalidIndex { index: 4, len: 4 })
        );
        // Unchanged on failure.
        assert_eq!(model.selected_index(), 1);
        assert_eq!(model.try_set_selected_index(-1), Ok(()));
        assert_eq!(model.selected_index(), -1);
    }

    #[test]
    fn test_selected_value_round_trip() {
        let mut model = fruits();
        model.set_selected_value(&"Cherry");
        assert_eq!(model.selected_value(), Some(&"Cherry"));

        model.set_selected_value(&"Durian");
        assert_eq!(model.selected_index(), -1);
        assert_eq!(model.selected_value(), None);
    }

    #[test]
    fn test_set_items_revalidates() {
        let mut model = fruits();
        model.set_selected_index(3);
        model.highlight(1).unwrap();

        // Highlight (1) survives, committed (3) becomes invalid.
        model.set_items(vec!["x", "y"]);
        assert_eq!(model.selected_index(), 1);
        assert_eq!(model.last_selected_index(), -1);

        model.set_items(vec!["only"]);
        assert_eq!(model.selected_index(), -1);
    }

    #[test]
    fn test_set_items_invalid_highlight_clears_commit() {
        let mut model = fruits();
        model.set_selected_index(1);
        model.highlight(3).unwrap();

        // Highlight (3) falls off the end while the commit (1) is still a row.
        model.set_items(vec!["x", "y"]);
        assert_eq!(model.selected_index(), -1);
        assert_eq!(model.last_selected_index(), -1);
        assert!(!model.has_uncommitted_preview());
    }

    #[test]
    fn test_set_items_keeps_valid_commit() {
        let mut model = fruits();
        model.set_selected_index(1);
        model.set_items(vec!["a", "b", "c"]);
        assert_eq!(model.selected_index(), 1);
        assert_eq!(model.last_selected_index(), 1);
    }

    #[test]
    fn test_highlight_commit_revert() {
        let mut model = fruits();
        model.set_selected_index(0);

        model.highlight(2).unwrap();
        assert!(model.has_uncommitted_preview());
        assert!(model.revert());
        assert_eq!(model.selected_index(), 0);
        assert!(!model.revert());

        model.highlight(3).unwrap();
        assert!(model.commit());
        assert_eq!(model.last_selected_index(), 3);
        assert!(!model.commit());

        assert!(model.highlight(9).is_err());
        assert_eq!(model.selected_index(), 3);
    }

    #[test]
    fn test_find_by_initial() {
        let model = fruits();
        assert_eq!(model.find_by_initial('a'), Some(0));
        assert_eq!(model.find_by_initial('B'), Some(1));
        assert_eq!(model.find_by_initial('c'), Some(2));
        assert_eq!(model.find_by_initial('z'), None);
    }

    #[test]
    fn test_find_by_initial_skips_empty_labels() {
        let model = SelectionModel::new().with_items(vec!["", "Éclair"]);
        assert_eq!(model.find_by_initial('é'), Some(1));
    }

    #[test]
    fn test_placeholder() {
        let mut model = fruits().with_placeholder("Pick one");
        assert_eq!(model.placeholder(), "Pick one");
        assert!(!model.set_placeholder("Pick one"));
        assert!(model.set_placeholder("Choose"));
    }

    #[test]
    fn test_index_of_first_match() {
        let model = SelectionModel::new().with_items(vec![1, 2, 2, 3]);
        assert_eq!(model.index_of(&2), 1);
        assert_eq!(model.index_of(&4), -1);
    }
}
