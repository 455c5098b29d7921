//! Immutable query snapshots and their backend encoding.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::selection::FilterSelection;

/// Filter selection plus search term, frozen at the moment it was applied.
///
/// Two snapshots are equal when their selections are equal as sets and their
/// (trimmed) search terms match exactly. A blank search term is stored as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySnapshot {
    selection: FilterSelection,
    search: Option<String>,
}

impl ValueObject for QuerySnapshot {}

impl QuerySnapshot {
    pub fn new(selection: FilterSelection, search: Option<&str>) -> Self {
        Self {
            selection,
            search: normalize_search(search),
        }
    }

    /// Snapshot with no filters and no search (the unfiltered listing).
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.selection.is_empty() && self.search.is_none()
    }

    /// Attribute filters in selection order.
    pub fn attribute_filters(&self) -> Vec<AttributeFilter> {
        self.selection
            .iter()
            .map(|(slug, values)| AttributeFilter {
                slug: slug.to_string(),
                values: values.iter().cloned().collect(),
            })
            .collect()
    }

    /// Backend filter object for this snapshot.
    pub fn to_filter_input(&self) -> ProductFilterInput {
        ProductFilterInput {
            attributes: self.attribute_filters(),
            search: self.search.clone(),
        }
    }
}

/// Trimmed search term, or `None` when nothing is left after trimming.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

/// `{ slug, values }` entry of the backend attribute filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub slug: String,
    pub values: Vec<String>,
}

impl ValueObject for AttributeFilter {}

/// Product filter object sent to the backend.
///
/// Empty parts are omitted rather than sent as vacuous filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilterInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
