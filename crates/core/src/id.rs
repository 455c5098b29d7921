//! Strongly-typed identifiers used across the client.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a product, as issued by the commerce backend.
///
/// The backend hands out opaque (typically base64 encoded) strings; the client
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a product variant, as issued by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

/// Correlation id of a single fetch issued by the client.
///
/// Used to tie "issued" and "resolved" log lines together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

macro_rules! impl_opaque_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a backend-issued identifier.
            ///
            /// Returns an error for empty (or whitespace-only) input.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_opaque_string_id!(ProductId, "ProductId");
impl_opaque_string_id!(VariantId, "VariantId");

impl RequestId {
    /// Create a new request id.
    ///
    /// Uses UUIDv7 (time-ordered), so ids sort in issue order.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_blank_input() {
        let err = ProductId::new("   ").unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.contains("ProductId")),
            _ => panic!("Expected InvalidId error"),
        }
    }

    #[test]
    fn product_id_keeps_opaque_value_untouched() {
        let id: ProductId = "UHJvZHVjdDo3Mg==".parse().unwrap();
        assert_eq!(id.as_str(), "UHJvZHVjdDo3Mg==");
        assert_eq!(id.to_string(), "UHJvZHVjdDo3Mg==");
    }

    #[test]
    fn product_id_deserializes_transparently() {
        let id: ProductId = serde_json::from_str("\"UHJvZHVjdDox\"").unwrap();
        assert_eq!(id.as_str(), "UHJvZHVjdDox");
    }

    #[test]
    fn request_ids_are_unique_v7() {
        let first = RequestId::new();
        let second = RequestId::new();
        assert_ne!(first, second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
    }
}
