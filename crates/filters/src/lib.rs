//! Product filter state.
//!
//! Accumulates attribute/value selections from the filter sidebar and projects
//! them into immutable [`QuerySnapshot`]s for the fetch layer. Pure logic: no
//! IO, no async, no knowledge of how snapshots are transmitted.

pub mod selection;
pub mod snapshot;
pub mod state;

pub use selection::FilterSelection;
pub use selection::parse_filter_arg;
pub use snapshot::{normalize_search, AttributeFilter, ProductFilterInput, QuerySnapshot};
pub use state::FilterState;
