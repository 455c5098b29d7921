use crate::selection::FilterSelection;
use crate::snapshot::QuerySnapshot;

/// Filter sidebar state.
///
/// Toggles only edit the local selection; nothing is fetched until the caller
/// takes a snapshot at its "apply" boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selection: FilterSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing selection (e.g. restored from the page URL).
    pub fn with_selection(selection: FilterSelection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Select (`selected = true`) or deselect a value and return the new selection.
    pub fn toggle_value(
        &mut self,
        attribute_slug: &str,
        value_slug: &str,
        selected: bool,
    ) -> &FilterSelection {
        self.selection.toggle(attribute_slug, value_slug, selected);
        &self.selection
    }

    /// Drop every selected value.
    pub fn clear(&mut self) -> &FilterSelection {
        self.selection = FilterSelection::new();
        &self.selection
    }

    /// Replace the whole selection.
    pub fn replace(&mut self, selection: FilterSelection) -> &FilterSelection {
        self.selection = selection;
        &self.selection
    }

    /// Number of selected values, shown on the filter badge.
    pub fn active_count(&self) -> usize {
        self.selection.active_count()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn is_selected(&self, attribute_slug: &str, value_slug: &str) -> bool {
        self.selection.is_selected(attribute_slug, value_slug)
    }

    /// Freeze the current selection (and optional search term) into a snapshot.
    pub fn to_snapshot(&self, search_term: Option<&str>) -> QuerySnapshot {
        QuerySnapshot::new(self.selection.clone(), search_term)
    }
}
