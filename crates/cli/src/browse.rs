//! `browse`: drive a product-list view the way the listing page does.

use std::sync::Arc;

use serde::Serialize;

use storefront_catalog::{FilterCatalog, Product};
use storefront_query::{FetchError, ProductFetcher, ProductListView, QueryConfig};

use crate::args::BrowseArgs;

/// Outcome of a browse run.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseReport {
    pub products: Vec<Product>,
    pub pages_loaded: u32,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

/// Apply the selection and search, then page through up to `args.pages` pages.
///
/// A failed page stops paging; products loaded so far are kept in the report.
pub async fn run(
    fetcher: Arc<dyn ProductFetcher>,
    config: &QueryConfig,
    args: &BrowseArgs,
) -> BrowseReport {
    let catalog = FilterCatalog::default();
    for (attribute, value) in &args.filters {
        if !catalog.is_known(attribute, value) {
            tracing::warn!("filter {}={} is not offered by the sidebar; sending as-is", attribute, value);
        }
    }

    let mut view = ProductListView::new(fetcher, config).with_selection(args.selection());
    match args.search.as_deref() {
        Some(term) => view.set_search(Some(term)),
        None => view.apply(),
    };
    view.settle().await;

    let mut pages_loaded = u32::from(view.last_error().is_none());
    while pages_loaded < args.pages && view.last_error().is_none() {
        if !view.load_more() {
            break;
        }
        view.settle().await;
        if view.last_error().is_none() {
            pages_loaded += 1;
        }
    }

    tracing::info!(
        products = view.current_items().len(),
        pages_loaded,
        has_more = view.has_more(),
        "browse finished"
    );

    BrowseReport {
        products: view.current_items().to_vec(),
        pages_loaded,
        has_more: view.has_more(),
        error: view.last_error().cloned(),
    }
}
