//! Listing behaviour configuration.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: `{value}` ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Product list configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Products requested per page.
    pub page_size: u32,
    /// Quiet period before a typed search term is applied.
    pub search_debounce: Duration,
    /// Distance from the list end (px) at which the next page is requested.
    pub scroll_threshold_px: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl QueryConfig {
    /// Read overrides from the environment, falling back to defaults.
    ///
    /// - `STOREFRONT_PAGE_SIZE`
    /// - `STOREFRONT_SEARCH_DEBOUNCE_MS`
    /// - `STOREFRONT_SCROLL_THRESHOLD_PX`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`QueryConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(page_size) = parse_u32(&lookup, "STOREFRONT_PAGE_SIZE")? {
            if page_size == 0 {
                return Err(ConfigError::Invalid {
                    var: "STOREFRONT_PAGE_SIZE",
                    value: page_size.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            config.page_size = page_size;
        }
        if let Some(ms) = parse_u32(&lookup, "STOREFRONT_SEARCH_DEBOUNCE_MS")? {
            config.search_debounce = Duration::from_millis(u64::from(ms));
        }
        if let Some(px) = parse_u32(&lookup, "STOREFRONT_SCROLL_THRESHOLD_PX")? {
            config.scroll_threshold_px = px;
        }

        Ok(config)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_scroll_threshold(mut self, px: u32) -> Self {
        self.scroll_threshold_px = px;
        self
    }
}

fn parse_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_storefront_behaviour() {
        let config = QueryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.scroll_threshold_px, 100);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = QueryConfig::from_lookup(lookup(&[
            ("STOREFRONT_PAGE_SIZE", "24"),
            ("STOREFRONT_SEARCH_DEBOUNCE_MS", " 250 "),
            ("STOREFRONT_SCROLL_THRESHOLD_PX", "0"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.search_debounce, Duration::from_millis(250));
        assert_eq!(config.scroll_threshold_px, 0);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = QueryConfig::from_lookup(lookup(&[("STOREFRONT_PAGE_SIZE", "twelve")])).unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, "STOREFRONT_PAGE_SIZE");
                assert_eq!(value, "twelve");
            }
        }

        assert!(QueryConfig::from_lookup(lookup(&[("STOREFRONT_PAGE_SIZE", "0")])).is_err());
    }
}
