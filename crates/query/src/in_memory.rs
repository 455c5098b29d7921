//! In-memory product fetcher for tests/dev.

use std::collections::VecDeque;
use std::sync::Mutex;

use storefront_catalog::Product;
use storefront_filters::QuerySnapshot;

use crate::fetcher::{Cursor, FetchError, FetchPage, ProductFetcher};

/// A recorded call to [`InMemoryProductFetcher::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub snapshot: QuerySnapshot,
    pub page_size: u32,
    pub cursor: Option<Cursor>,
}

/// Serves pages out of a fixed product list.
///
/// - Values of one attribute are OR-ed, attributes are AND-ed.
/// - Search is a case-insensitive substring match on the product name.
/// - Cursors are `offset:<n>` tokens.
#[derive(Debug, Default)]
pub struct InMemoryProductFetcher {
    products: Vec<Product>,
    calls: Mutex<Vec<FetchCall>>,
    failures: Mutex<VecDeque<FetchError>>,
}

impl InMemoryProductFetcher {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Make the next fetch fail with `error` (queued, one per call).
    pub fn fail_next(&self, error: FetchError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(error);
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn matches(product: &Product, snapshot: &QuerySnapshot) -> bool {
        let attributes_match = snapshot.selection().iter().all(|(attribute, values)| {
            values
                .iter()
                .any(|value| product.has_attribute_value(attribute, value))
        });
        let search_matches = snapshot.search().is_none_or(|term| {
            product
                .name()
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        attributes_match && search_matches
    }

    fn decode_cursor(cursor: Option<&Cursor>) -> Result<usize, FetchError> {
        let Some(cursor) = cursor else {
            return Ok(0);
        };
        cursor
            .as_str()
            .strip_prefix("offset:")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| FetchError::Backend(format!("invalid cursor `{cursor}`")))
    }
}

#[async_trait::async_trait]
impl ProductFetcher for InMemoryProductFetcher {
    async fn fetch(
        &self,
        snapshot: &QuerySnapshot,
        page_size: u32,
        cursor: Option<&Cursor>,
    ) -> Result<FetchPage, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(FetchCall {
                snapshot: snapshot.clone(),
                page_size,
                cursor: cursor.cloned(),
            });
        }

        let failure = self
            .failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.pop_front());
        if let Some(error) = failure {
            return Err(error);
        }

        let offset = Self::decode_cursor(cursor)?;
        let matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| Self::matches(p, snapshot))
            .collect();

        let end = offset.saturating_add(page_size as usize).min(matching.len());
        let items: Vec<Product> = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|p| (*p).clone())
            .collect();
        let next_cursor = (end < matching.len()).then(|| Cursor::new(format!("offset:{end}")));

        Ok(FetchPage::new(items, next_cursor))
    }
}
