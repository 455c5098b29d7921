//! Known filter options offered by the product-list sidebar.
//!
//! This is presentation data: the filter core accepts any slug, and the
//! catalog is only consulted to render checkboxes and labels.

use serde::{Deserialize, Serialize};

/// One filterable attribute with the values the sidebar offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub attribute_slug: String,
    pub values: Vec<String>,
}

impl FilterOption {
    pub fn new(attribute_slug: impl Into<String>, values: &[&str]) -> Self {
        Self {
            attribute_slug: attribute_slug.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Ordered set of filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCatalog {
    options: Vec<FilterOption>,
}

impl FilterCatalog {
    pub fn new(options: Vec<FilterOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    pub fn option(&self, attribute_slug: &str) -> Option<&FilterOption> {
        self.options.iter().find(|o| o.attribute_slug == attribute_slug)
    }

    pub fn is_known(&self, attribute_slug: &str, value_slug: &str) -> bool {
        self.option(attribute_slug)
            .is_some_and(|o| o.values.iter().any(|v| v == value_slug))
    }

    /// Checkbox label for a value slug (`white-gold` -> `white gold`).
    pub fn label(value_slug: &str) -> String {
        value_slug.replacen('-', " ", 1)
    }
}

impl Default for FilterCatalog {
    /// Options of the jewellery storefront.
    fn default() -> Self {
        Self::new(vec![
            FilterOption::new("color", &["white-gold", "gold", "silver", "rose-gold"]),
            FilterOption::new("metal", &["gold", "silver", "platinum"]),
            FilterOption::new("carat", &["1", "2", "3", "5"]),
            FilterOption::new("gender", &["male", "female", "unisex"]),
            FilterOption::new("shape", &["round", "oval", "square", "heart"]),
            FilterOption::new("size", &["1", "2", "3", "4", "5"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_keeps_sidebar_order() {
        let catalog = FilterCatalog::default();
        let slugs: Vec<&str> = catalog
            .options()
            .iter()
            .map(|o| o.attribute_slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["color", "metal", "carat", "gender", "shape", "size"]);
    }

    #[test]
    fn is_known_checks_attribute_and_value() {
        let catalog = FilterCatalog::default();
        assert!(catalog.is_known("shape", "oval"));
        assert!(!catalog.is_known("shape", "triangle"));
        assert!(!catalog.is_known("stone", "round"));
    }

    #[test]
    fn label_replaces_first_hyphen() {
        assert_eq!(FilterCatalog::label("white-gold"), "white gold");
        assert_eq!(FilterCatalog::label("round"), "round");
    }
}
