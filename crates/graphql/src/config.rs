use std::time::Duration;

use storefront_query::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://saleor-kombee.onrender.com/graphql/";
pub const DEFAULT_CHANNEL: &str = "online-inr";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlConfig {
    pub endpoint: String,
    /// Sales channel prices and availability are resolved against.
    pub channel: String,
    pub timeout: Duration,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GraphQlConfig {
    /// Read `STOREFRONT_GRAPHQL_URL`, `STOREFRONT_CHANNEL` and
    /// `STOREFRONT_HTTP_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(endpoint) = non_blank(&lookup, "STOREFRONT_GRAPHQL_URL") {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: "STOREFRONT_GRAPHQL_URL",
                    value: endpoint,
                    reason: "expected an http(s) URL".to_string(),
                });
            }
            config.endpoint = endpoint;
        }
        if let Some(channel) = non_blank(&lookup, "STOREFRONT_CHANNEL") {
            config.channel = channel;
        }
        if let Some(raw) = non_blank(&lookup, "STOREFRONT_HTTP_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "STOREFRONT_HTTP_TIMEOUT_SECS",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_storefront() {
        let config = GraphQlConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GraphQlConfig::default());
        assert_eq!(config.channel, "online-inr");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = GraphQlConfig::from_lookup(|var| match var {
            "STOREFRONT_GRAPHQL_URL" => Some("http://localhost:8000/graphql/".into()),
            "STOREFRONT_CHANNEL" => Some(" default-channel ".into()),
            "STOREFRONT_HTTP_TIMEOUT_SECS" => Some("5".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8000/graphql/");
        assert_eq!(config.channel, "default-channel");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = GraphQlConfig::from_lookup(|_| Some("  ".into())).unwrap();
        assert_eq!(config, GraphQlConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let err = GraphQlConfig::from_lookup(|var| {
            (var == "STOREFRONT_GRAPHQL_URL").then(|| "ftp://example".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "STOREFRONT_GRAPHQL_URL",
                ..
            }
        ));

        let err = GraphQlConfig::from_lookup(|var| {
            (var == "STOREFRONT_HTTP_TIMEOUT_SECS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "STOREFRONT_HTTP_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
