//! Query planning
//!
//! Decides which of the two lookups a validated request asks for and binds
//! its single parameter. User input never reaches the query text.

use crate::errors::{Result, SearchError};
use crate::model::RequestFields;
use serde::Serialize;

/// Lookup of a stored search result set by id
pub const SEARCH_RESULT_TEMPLATE: &str = "SELECT * FROM vb_searchresult WHERE searchid = ?1";

/// Substring search over post text
pub const POST_TEXT_TEMPLATE: &str = "SELECT * FROM vb_post WHERE text LIKE ?1";

/// The decided lookup and its bound parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "param", rename_all = "snake_case")]
pub enum QueryPlan {
    /// Show a stored result set
    BySearchId(String),
    /// `LIKE` search; the pattern is already wrapped in `%…%`
    ByText(String),
}

impl QueryPlan {
    /// The fixed template for this variant (one positional placeholder)
    pub fn template(&self) -> &'static str {
        match self {
            QueryPlan::BySearchId(_) => SEARCH_RESULT_TEMPLATE,
            QueryPlan::ByText(_) => POST_TEXT_TEMPLATE,
        }
    }

    /// The single value bound to the placeholder
    pub fn param(&self) -> &str {
        match self {
            QueryPlan::BySearchId(id) => id,
            QueryPlan::ByText(pattern) => pattern,
        }
    }

    /// Legacy `do` mode name
    pub fn mode(&self) -> &'static str {
        match self {
            QueryPlan::BySearchId(_) => "showResults",
            QueryPlan::ByText(_) => "process",
        }
    }
}

/// Decide the plan for a validated request
///
/// A non-empty `searchid` wins over `q`.
///
/// # Errors
/// * `UnrecognizedRequest` - neither `searchid` nor `q` carries text
pub fn plan(fields: &RequestFields) -> Result<QueryPlan> {
    if let Some(id) = non_empty_text(fields, "searchid") {
        return Ok(QueryPlan::BySearchId(id.to_string()));
    }
    if let Some(text) = non_empty_text(fields, "q") {
        return Ok(QueryPlan::ByText(format!("%{}%", text)));
    }
    Err(SearchError::UnrecognizedRequest)
}

fn non_empty_text<'a>(fields: &'a RequestFields, name: &str) -> Option<&'a str> {
    fields.get_text(name).filter(|value| !value.is_empty())
}
