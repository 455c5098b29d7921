//! Product fetch contract consumed by the coordinator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_catalog::Product;
use storefront_filters::QuerySnapshot;

/// Opaque pagination token handed out by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Cursor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results.
///
/// An absent `next_cursor` means there are no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchPage {
    pub items: Vec<Product>,
    pub next_cursor: Option<Cursor>,
}

impl FetchPage {
    pub fn new(items: Vec<Product>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    pub fn last(items: Vec<Product>) -> Self {
        Self::new(items, None)
    }
}

/// Failure while retrieving products. Recoverable; shown as a retryable message.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message shown to the shopper.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Retrieves one page of products for a snapshot.
///
/// Implementations do not know about coordinator state; they only honour the
/// "absent cursor means no more pages" convention.
#[async_trait::async_trait]
pub trait ProductFetcher: Send + Sync {
    async fn fetch(
        &self,
        snapshot: &QuerySnapshot,
        page_size: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FetchPage, FetchError>;
}

#[async_trait::async_trait]
impl<F> ProductFetcher for std::sync::Arc<F>
where
    F: ProductFetcher + ?Sized,
{
    async fn fetch(
        &self,
        snapshot: &QuerySnapshot,
        page_size: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FetchPage, FetchError> {
        (**self).fetch(snapshot, page_size, cursor).await
    }
}
