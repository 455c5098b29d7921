//! Product list query coordination.
//!
//! Turns filter snapshots and pagination requests into exactly the fetches a
//! product-list view needs:
//!
//! - [`ProductQueryCoordinator`]: synchronous state machine (no IO). Every
//!   entry point returns the [`FetchRequest`] the caller must issue, and every
//!   completion is matched against the request currently in flight. Results
//!   that were superseded are discarded, never merged.
//! - [`ProductListView`]: async driver owning one filter state, one coordinator
//!   and a [`ProductFetcher`]; fetches run on tokio tasks and their completions
//!   are applied one at a time.

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod fetcher;
pub mod in_memory;
pub mod page;
pub mod scroll;
pub mod view;

pub use config::{ConfigError, QueryConfig};
pub use coordinator::{
    CoordinatorState, FetchKind, FetchRequest, FetchTag, ProductQueryCoordinator, Resolution,
};
pub use debounce::SearchDebouncer;
pub use fetcher::{Cursor, FetchError, FetchPage, ProductFetcher};
pub use in_memory::{FetchCall, InMemoryProductFetcher};
pub use page::PageState;
pub use scroll::ScrollTrigger;
pub use view::ProductListView;
