//! Canonical schema constants for structured logging
//!
//! These keep field names identical across the pipeline, the store and the CLI.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Search pipeline
pub const FIELD_PLAN_MODE: &str = "plan_mode";
pub const FIELD_ROWS_FETCHED: &str = "rows_fetched";
pub const FIELD_ROWS_RENDERED: &str = "rows_rendered";
pub const FIELD_ROWS_SKIPPED: &str = "rows_skipped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
