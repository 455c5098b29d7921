//! Async driver for one product-list view.
//!
//! All state transitions happen on `&mut self`, one at a time. Fetches run on
//! tokio tasks tracked in a `JoinSet`; [`ProductListView::next_completion`]
//! applies them in completion order. A fetch that panics completes with a
//! [`FetchError::Backend`] for its own tag. Methods that issue fetches must be
//! called from within a tokio runtime.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use storefront_catalog::Product;
use storefront_core::RequestId;
use storefront_filters::{FilterSelection, FilterState, QuerySnapshot};

use crate::config::QueryConfig;
use crate::coordinator::{FetchRequest, FetchTag, ProductQueryCoordinator, Resolution};
use crate::debounce::SearchDebouncer;
use crate::fetcher::{FetchError, FetchPage, ProductFetcher};
use crate::scroll::ScrollTrigger;

#[derive(Debug)]
struct Completion {
    request_id: RequestId,
    tag: FetchTag,
    outcome: Result<FetchPage, FetchError>,
}

pub struct ProductListView {
    filters: FilterState,
    search: Option<String>,
    debouncer: SearchDebouncer,
    scroll: ScrollTrigger,
    coordinator: ProductQueryCoordinator,
    fetcher: Arc<dyn ProductFetcher>,
    fetches: JoinSet<Completion>,
}

impl core::fmt::Debug for ProductListView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductListView")
            .field("filters", &self.filters)
            .field("search", &self.search)
            .field("coordinator", &self.coordinator)
            .field("outstanding", &self.fetches.len())
            .finish_non_exhaustive()
    }
}

impl ProductListView {
    pub fn new(fetcher: Arc<dyn ProductFetcher>, config: &QueryConfig) -> Self {
        Self {
            filters: FilterState::new(),
            search: None,
            debouncer: SearchDebouncer::from_config(config),
            scroll: ScrollTrigger::from_config(config),
            coordinator: ProductQueryCoordinator::new(config),
            fetcher,
            fetches: JoinSet::new(),
        }
    }

    /// Start from a selection restored from the page URL (not yet applied).
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.filters = FilterState::with_selection(selection);
        self
    }

    // --- filter edits (never fetch) ---------------------------------------

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn toggle(&mut self, attribute_slug: &str, value_slug: &str, selected: bool) -> &FilterSelection {
        self.filters.toggle_value(attribute_slug, value_slug, selected)
    }

    // --- fetch-issuing actions --------------------------------------------

    /// Apply the current selection and search term. Returns whether a fetch was issued.
    pub fn apply(&mut self) -> bool {
        let snapshot = self.current_snapshot();
        tracing::info!(
            active_filters = self.filters.active_count(),
            search = ?snapshot.search(),
            "applying product filters"
        );
        let request = self.coordinator.on_snapshot_changed(snapshot);
        self.dispatch(request)
    }

    /// Clear every filter and apply the unfiltered selection.
    pub fn clear(&mut self) -> bool {
        self.filters.clear();
        self.apply()
    }

    /// Set the search term immediately (e.g. from the page URL) and apply.
    pub fn set_search(&mut self, term: Option<&str>) -> bool {
        self.debouncer.cancel();
        self.search = term.map(str::to_string);
        self.apply()
    }

    /// Record a search keystroke; applied once the quiet period elapses.
    pub fn search_input(&mut self, term: &str, now: Instant) {
        self.debouncer.input(term, now);
    }

    /// Apply the typed search term if its quiet period has elapsed at `now`.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                self.search = Some(term);
                self.apply()
            }
            None => false,
        }
    }

    /// Wait out the pending quiet period (if any) and apply the typed term.
    pub async fn flush_search(&mut self) -> bool {
        let Some(deadline) = self.debouncer.deadline() else {
            return false;
        };
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.poll_search(Instant::now())
    }

    pub fn load_more(&mut self) -> bool {
        let request = self.coordinator.on_load_more_requested();
        self.dispatch(request)
    }

    /// Scroll event: `remaining_px` is the distance from the viewport to the list end.
    pub fn on_scroll(&mut self, remaining_px: u32) -> bool {
        if !self
            .scroll
            .should_load_more(remaining_px, self.coordinator.has_more(), self.coordinator.is_busy())
        {
            return false;
        }
        self.load_more()
    }

    pub fn retry(&mut self) -> bool {
        let request = self.coordinator.retry();
        self.dispatch(request)
    }

    pub fn clear_error(&mut self) {
        self.coordinator.clear_error();
    }

    // --- completions ------------------------------------------------------

    /// Number of issued fetches whose completion has not been applied yet
    /// (including ones that will be discarded as stale).
    pub fn outstanding(&self) -> usize {
        self.fetches.len()
    }

    /// Wait for the next fetch completion and apply it.
    ///
    /// Returns `None` when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<Resolution> {
        let completion = loop {
            match self.fetches.join_next().await? {
                Ok(completion) => break completion,
                // Only reachable if the wrapper task itself was cancelled.
                Err(err) => tracing::error!("fetch wrapper task failed: {err}"),
            }
        };

        let resolution = match completion.outcome {
            Ok(page) => self.coordinator.on_fetch_resolved(&completion.tag, page),
            Err(error) => self.coordinator.on_fetch_failed(&completion.tag, error),
        };
        tracing::debug!(request_id = %completion.request_id, ?resolution, "fetch completion handled");
        Some(resolution)
    }

    /// Apply completions until no fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    // --- read surface -----------------------------------------------------

    pub fn current_items(&self) -> &[Product] {
        self.coordinator.current_items()
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn has_more(&self) -> bool {
        self.coordinator.has_more()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.coordinator.last_error()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn coordinator(&self) -> &ProductQueryCoordinator {
        &self.coordinator
    }

    // --- internals --------------------------------------------------------

    fn current_snapshot(&self) -> QuerySnapshot {
        self.filters.to_snapshot(self.search.as_deref())
    }

    fn dispatch(&mut self, request: Option<FetchRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };

        let fetcher = Arc::clone(&self.fetcher);
        self.fetches.spawn(async move {
            let FetchRequest {
                id,
                tag,
                page_size,
                cursor,
            } = request;
            let snapshot = tag.snapshot().clone();

            // The fetch runs on its own task so a panic surfaces as a JoinError
            // carrying this request's tag instead of losing the completion.
            let fetch = tokio::spawn(async move {
                fetcher.fetch(&snapshot, page_size, cursor.as_ref()).await
            });
            let outcome = fetch.await.unwrap_or_else(|err| {
                tracing::error!(request_id = %id, "product fetch task aborted: {err}");
                Err(FetchError::Backend(format!("fetch task aborted: {err}")))
            });

            Completion {
                request_id: id,
                tag,
                outcome,
            }
        });
        true
    }
}
