//! forumsearch engine - the search request pipeline
//!
//! validate → plan → (search log) → connect → execute → filter → render

pub mod pipeline;

pub use pipeline::{handle_search, run_search, run_search_with, SearchOutcome, SearchSummary};
