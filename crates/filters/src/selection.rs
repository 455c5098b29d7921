//! Attribute selection mapping.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Selected filter values, keyed by attribute slug.
///
/// Invariant: a key is present only while its value set is non-empty.
///
/// Equality is set-based (order of keys and values is ignored), while iteration
/// follows insertion order so the sidebar renders selections stably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Vec<String>>",
    into = "IndexMap<String, Vec<String>>"
)]
pub struct FilterSelection {
    attributes: IndexMap<String, IndexSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from `(attribute, value)` pairs.
    pub fn from_pairs<A, V>(pairs: impl IntoIterator<Item = (A, V)>) -> Self
    where
        A: Into<String>,
        V: Into<String>,
    {
        let mut selection = Self::new();
        for (attribute, value) in pairs {
            selection.toggle(attribute, value, true);
        }
        selection
    }

    /// Select or deselect a single value.
    ///
    /// Returns `true` when the selection changed. Slugs are opaque; unknown
    /// attributes and values are accepted as-is.
    pub fn toggle(
        &mut self,
        attribute_slug: impl Into<String>,
        value_slug: impl Into<String>,
        selected: bool,
    ) -> bool {
        let attribute_slug = attribute_slug.into();
        let value_slug = value_slug.into();

        if selected {
            return self
                .attributes
                .entry(attribute_slug)
                .or_default()
                .insert(value_slug);
        }

        let Some(values) = self.attributes.get_mut(&attribute_slug) else {
            return false;
        };
        let removed = values.shift_remove(&value_slug);
        if values.is_empty() {
            self.attributes.shift_remove(&attribute_slug);
        }
        removed
    }

    pub fn is_selected(&self, attribute_slug: &str, value_slug: &str) -> bool {
        self.attributes
            .get(attribute_slug)
            .is_some_and(|values| values.contains(value_slug))
    }

    /// Selected values of one attribute, in selection order.
    pub fn values(&self, attribute_slug: &str) -> impl Iterator<Item = &str> {
        self.attributes
            .get(attribute_slug)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Attributes with at least one selected value, in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.attributes.iter().map(|(slug, values)| (slug.as_str(), values))
    }

    /// Total number of selected values across all attributes.
    pub fn active_count(&self) -> usize {
        self.attributes.values().map(IndexSet::len).sum()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<IndexMap<String, Vec<String>>> for FilterSelection {
    /// Empty value lists are dropped to keep the non-empty invariant.
    fn from(value: IndexMap<String, Vec<String>>) -> Self {
        Self::from_pairs(
            value
                .into_iter()
                .flat_map(|(slug, values)| values.into_iter().map(move |v| (slug.clone(), v))),
        )
    }
}

impl From<FilterSelection> for IndexMap<String, Vec<String>> {
    fn from(value: FilterSelection) -> Self {
        value
            .attributes
            .into_iter()
            .map(|(slug, values)| (slug, values.into_iter().collect()))
            .collect()
    }
}

/// Parse an `attribute=value` argument (as typed on the command line).
pub fn parse_filter_arg(arg: &str) -> DomainResult<(String, String)> {
    let (attribute, value) = arg
        .split_once('=')
        .ok_or_else(|| DomainError::validation(format!("expected attribute=value, got `{arg}`")))?;

    let attribute = attribute.trim();
    let value = value.trim();
    if attribute.is_empty() || value.is_empty() {
        return Err(DomainError::validation(format!(
            "attribute and value must be non-empty in `{arg}`"
        )));
    }

    Ok((attribute.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_on_creates_attribute_entry() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle("shape", "round", true));
        assert!(selection.is_selected("shape", "round"));
        assert_eq!(selection.attribute_count(), 1);
    }

    #[test]
    fn toggle_on_twice_is_idempotent() {
        let mut selection = FilterSelection::new();
        selection.toggle("shape", "round", true);
        assert!(!selection.toggle("shape", "round", true));
        assert_eq!(selection.active_count(), 1);
    }

    #[test]
    fn removing_last_value_drops_the_attribute() {
        let mut selection = FilterSelection::from_pairs([("shape", "round"), ("metal", "gold")]);
        assert!(selection.toggle("shape", "round", false));
        assert!(selection.values("shape").next().is_none());
        assert_eq!(selection.attribute_count(), 1);
        assert!(selection.iter().all(|(slug, _)| slug != "shape"));
    }

    #[test]
    fn removing_unknown_value_is_a_noop() {
        let mut selection = FilterSelection::from_pairs([("shape", "round")]);
        assert!(!selection.toggle("shape", "oval", false));
        assert!(!selection.toggle("stone", "ruby", false));
        assert_eq!(selection, FilterSelection::from_pairs([("shape", "round")]));
    }

    #[test]
    fn iteration_follows_selection_order() {
        let selection = FilterSelection::from_pairs([
            ("shape", "oval"),
            ("metal", "gold"),
            ("shape", "round"),
        ]);
        let shapes: Vec<&str> = selection.values("shape").collect();
        assert_eq!(shapes, vec!["oval", "round"]);
        let attributes: Vec<&str> = selection.iter().map(|(slug, _)| slug).collect();
        assert_eq!(attributes, vec!["shape", "metal"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a = FilterSelection::from_pairs([("shape", "oval"), ("shape", "round"), ("metal", "gold")]);
        let b = FilterSelection::from_pairs([("metal", "gold"), ("shape", "round"), ("shape", "oval")]);
        assert_eq!(a, b);
    }

    #[test]
    fn deserializing_drops_empty_value_lists() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"shape":["round"],"metal":[]}"#).unwrap();
        assert_eq!(selection.attribute_count(), 1);
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"shape":["round"]}"#
        );
    }

    #[test]
    fn parse_filter_arg_splits_on_first_equals() {
        assert_eq!(
            parse_filter_arg("shape=round").unwrap(),
            ("shape".to_string(), "round".to_string())
        );
        assert_eq!(
            parse_filter_arg(" size = 5 ").unwrap(),
            ("size".to_string(), "5".to_string())
        );
    }

    #[test]
    fn parse_filter_arg_rejects_malformed_input() {
        for bad in ["shape", "=round", "shape=", "  =  "] {
            match parse_filter_arg(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {bad:?}, got {other:?}"),
            }
        }
    }
}
