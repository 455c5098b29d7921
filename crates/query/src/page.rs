use storefront_catalog::Product;

use crate::fetcher::{Cursor, FetchPage};

/// Loaded pages of the current query.
///
/// Replaced wholesale when the query changes; extended in place by "load more".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    cursor: Option<Cursor>,
    has_more: bool,
    items: Vec<Product>,
    is_fetching: bool,
}

impl PageState {
    /// Empty page state (nothing loaded, nothing more to load yet).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub(crate) fn set_fetching(&mut self, fetching: bool) {
        self.is_fetching = fetching;
    }

    /// Replace all items with the first page of a query.
    pub(crate) fn replace(&mut self, page: FetchPage) {
        self.items = page.items;
        self.set_cursor(page.next_cursor);
    }

    /// Append a further page, keeping existing items and their order.
    pub(crate) fn append(&mut self, page: FetchPage) {
        self.items.extend(page.items);
        self.set_cursor(page.next_cursor);
    }

    fn set_cursor(&mut self, next_cursor: Option<Cursor>) {
        self.has_more = next_cursor.is_some();
        self.cursor = next_cursor;
    }
}
