//! forumsearch core - request model, validation, planning and presentation
//!
//! This crate holds the pure parts of the search pipeline:
//! - Request fields and result rows
//! - The field rule table and markup sanitization
//! - Query planning (search-id lookup vs. text search)
//! - Excluded-category filtering and row renderers
//! - Configuration, the error facility and the logging facility
//!
//! Store access and the search log live in `forumsearch-store`; the
//! end-to-end pipeline lives in `forumsearch-engine`.

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod planner;
pub mod render;
pub mod rules;

/// Shared core types, re-exported for the logging macros
pub use forumsearch_core_types as types;

pub use config::SearchConfig;
pub use errors::{ExError, ExErrorKind, Result, SearchError};
pub use model::{FieldValue, RequestFields, ResultRow, RowValue};
pub use planner::{plan, QueryPlan};
pub use render::{present, CategoryFilter, ResultRenderer};
pub use rules::{validate, ValidationRule, ValidationRules};
