//! Query/pagination state machine.
//!
//! ```text
//!            snapshot changed                 resolved / failed
//!   Idle ─────────────────────▶ FetchingFresh ─────────────────▶ Idle
//!    │                               ▲
//!    │ load more (has_more)          │ snapshot changed (previous fetch goes stale)
//!    ▼                               │
//!   FetchingMore ────────────────────┘
//!    │ resolved / failed
//!    ▼
//!   Idle
//! ```
//!
//! At most one request is current at any time. Every request carries a
//! [`FetchTag`]; a completion is applied only if its tag is the one in flight.
//! Anything else is a stale result: it is counted and dropped.

use chrono::{DateTime, Utc};

use storefront_catalog::Product;
use storefront_core::RequestId;
use storefront_filters::QuerySnapshot;

use crate::config::QueryConfig;
use crate::fetcher::{Cursor, FetchError, FetchPage};
use crate::page::PageState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    FetchingFresh,
    FetchingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a (new) snapshot; replaces the item list.
    Fresh,
    /// Next page of the current snapshot; appends to the item list.
    More,
}

/// Identity of an issued request.
///
/// Carries the originating snapshot so a completion can be checked against the
/// snapshot that is current when it arrives. The sequence number tells apart
/// two requests for equal snapshots (e.g. A → B → A).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTag {
    sequence: u64,
    kind: FetchKind,
    snapshot: QuerySnapshot,
}

impl FetchTag {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn snapshot(&self) -> &QuerySnapshot {
        &self.snapshot
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// A fetch the caller must issue against its [`crate::ProductFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub tag: FetchTag,
    pub page_size: u32,
    pub cursor: Option<Cursor>,
}

/// What happened to a completion handed to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// Superseded by a newer request; PageState left untouched.
    Discarded,
}

/// Owns pagination state for one product-list view.
#[derive(Debug, Clone)]
pub struct ProductQueryCoordinator {
    page_size: u32,
    snapshot: Option<QuerySnapshot>,
    state: CoordinatorState,
    page: PageState,
    in_flight: Option<FetchTag>,
    next_sequence: u64,
    last_error: Option<FetchError>,
    failed: Option<FetchKind>,
    stale_discarded: u64,
    last_loaded_at: Option<DateTime<Utc>>,
}

impl Default for ProductQueryCoordinator {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}

impl ProductQueryCoordinator {
    pub fn new(config: &QueryConfig) -> Self {
        Self::with_page_size(config.page_size)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            snapshot: None,
            state: CoordinatorState::Idle,
            page: PageState::empty(),
            in_flight: None,
            next_sequence: 0,
            last_error: None,
            failed: None,
            stale_discarded: 0,
            last_loaded_at: None,
        }
    }

    // --- transitions -------------------------------------------------------

    /// A new snapshot was applied.
    ///
    /// Returns the page-1 request to issue, or `None` when the snapshot equals
    /// the tracked one. Re-applying an unchanged snapshot after its first page
    /// failed to load re-issues page 1.
    pub fn on_snapshot_changed(&mut self, snapshot: QuerySnapshot) -> Option<FetchRequest> {
        if self.snapshot.as_ref() == Some(&snapshot) {
            if self.state == CoordinatorState::Idle && self.failed == Some(FetchKind::Fresh) {
                tracing::info!("re-issuing first page after failure");
                return Some(self.issue(FetchKind::Fresh));
            }
            tracing::debug!("snapshot unchanged; no fetch issued");
            return None;
        }

        if let Some(previous) = &self.in_flight {
            tracing::debug!(
                sequence = previous.sequence,
                "in-flight fetch superseded by new snapshot"
            );
        }

        self.snapshot = Some(snapshot);
        // Items of the previous query are dropped right away; the list shows
        // the loading state until page 1 of the new query arrives.
        self.page = PageState::empty();
        Some(self.issue(FetchKind::Fresh))
    }

    /// The list was scrolled near its end.
    ///
    /// Ignored unless idle with more pages available; duplicate triggers while
    /// a fetch is pending are dropped, not queued.
    pub fn on_load_more_requested(&mut self) -> Option<FetchRequest> {
        if self.state != CoordinatorState::Idle {
            tracing::debug!(state = ?self.state, "load more ignored; fetch pending");
            return None;
        }
        if !self.page.has_more() || self.snapshot.is_none() {
            tracing::debug!("load more ignored; no further pages");
            return None;
        }
        Some(self.issue(FetchKind::More))
    }

    /// A fetch completed successfully.
    pub fn on_fetch_resolved(&mut self, tag: &FetchTag, result: FetchPage) -> Resolution {
        if !self.is_current(tag) {
            self.discard_stale(tag);
            return Resolution::Discarded;
        }

        let received = result.items.len();
        match tag.kind {
            FetchKind::Fresh => self.page.replace(result),
            FetchKind::More => self.page.append(result),
        }

        self.finish();
        self.failed = None;
        self.last_loaded_at = Some(Utc::now());

        tracing::info!(
            sequence = tag.sequence,
            kind = ?tag.kind,
            received,
            total = self.page.items().len(),
            has_more = self.page.has_more(),
            "products page applied"
        );
        Resolution::Applied
    }

    /// A fetch failed. Existing items are kept.
    pub fn on_fetch_failed(&mut self, tag: &FetchTag, error: FetchError) -> Resolution {
        if !self.is_current(tag) {
            self.discard_stale(tag);
            return Resolution::Discarded;
        }

        tracing::warn!(sequence = tag.sequence, kind = ?tag.kind, "product fetch failed: {error}");

        self.finish();
        self.failed = Some(tag.kind);
        self.last_error = Some(error);
        Resolution::Applied
    }

    /// Re-issue whatever failed last (page 1 or the pending "more" page).
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.state != CoordinatorState::Idle {
            return None;
        }
        match self.failed? {
            FetchKind::Fresh => Some(self.issue(FetchKind::Fresh)),
            FetchKind::More => self.on_load_more_requested(),
        }
    }

    /// Dismiss the error banner without retrying.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // --- read surface ------------------------------------------------------

    pub fn current_items(&self) -> &[Product] {
        self.page.items()
    }

    pub fn is_busy(&self) -> bool {
        self.state != CoordinatorState::Idle
    }

    pub fn has_more(&self) -> bool {
        self.page.has_more()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Snapshot the current page state belongs to.
    pub fn snapshot(&self) -> Option<&QuerySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn in_flight(&self) -> Option<&FetchTag> {
        self.in_flight.as_ref()
    }

    /// Number of completions dropped because they were superseded.
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    // --- internals ---------------------------------------------------------

    fn issue(&mut self, kind: FetchKind) -> FetchRequest {
        let snapshot = self.snapshot.clone().unwrap_or_default();
        let cursor = match kind {
            FetchKind::Fresh => None,
            FetchKind::More => self.page.cursor().cloned(),
        };

        let tag = FetchTag {
            sequence: self.next_sequence,
            kind,
            snapshot,
        };
        self.next_sequence += 1;

        self.state = match kind {
            FetchKind::Fresh => CoordinatorState::FetchingFresh,
            FetchKind::More => CoordinatorState::FetchingMore,
        };
        self.page.set_fetching(true);
        self.in_flight = Some(tag.clone());
        self.last_error = None;

        let request = FetchRequest {
            id: RequestId::new(),
            tag,
            page_size: self.page_size,
            cursor,
        };

        tracing::info!(
            request_id = %request.id,
            sequence = request.tag.sequence,
            kind = ?kind,
            cursor = ?request.cursor,
            "issuing product fetch"
        );
        request
    }

    fn is_current(&self, tag: &FetchTag) -> bool {
        self.in_flight.as_ref() == Some(tag)
    }

    fn finish(&mut self) {
        self.state = CoordinatorState::Idle;
        self.in_flight = None;
        self.page.set_fetching(false);
    }

    fn discard_stale(&mut self, tag: &FetchTag) {
        self.stale_discarded += 1;
        tracing::debug!(
            sequence = tag.sequence,
            kind = ?tag.kind,
            discarded = self.stale_discarded,
            "stale fetch result discarded"
        );
    }
}
