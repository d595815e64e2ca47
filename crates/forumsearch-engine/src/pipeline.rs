//! Search request pipeline
//!
//! `handle_search` runs the pipeline against an injected store;
//! `run_search` acquires the connection from configuration and optionally
//! appends the query text to the search log.
//!
//! Validation and planning failures end the request before any connection
//! is opened. A search-log failure is recorded on the outcome and never
//! aborts the search.

use std::time::Instant;

use forumsearch_core::config::SearchConfig;
use forumsearch_core::errors::{Result, SearchError};
use forumsearch_core::model::{RequestFields, ResultRow};
use forumsearch_core::planner::{self, QueryPlan};
use forumsearch_core::render::{CategoryFilter, ResultRenderer};
use forumsearch_core::rules::{validate, ValidationRules};
use forumsearch_core::types::RequestId;
use forumsearch_core::{log_op_end, log_op_error, log_op_start};
use forumsearch_store::search_log::{log_search_with, AppendOpener, FsAppendOpener};
use forumsearch_store::{ensure_connection, execute, ParameterizedStore};

/// Result of a pipeline run against a store
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    pub plan: QueryPlan,
    pub rows_fetched: usize,
    pub rows_rendered: usize,
}

/// Result of a configured pipeline run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub request_id: RequestId,
    pub plan: QueryPlan,
    pub rows_fetched: usize,
    pub rows_rendered: usize,
    /// Set when search logging was enabled and failed
    pub log_error: Option<SearchError>,
}

/// Validate, plan, execute against `store`, and render the retained rows
///
/// # Errors
/// * `MissingField` / `InvalidType` / `UnexpectedField` - validation
/// * `UnrecognizedRequest` - planning
/// * `Execution` - the store query failed
pub fn handle_search<S, R>(
    request: RequestFields,
    rules: &ValidationRules,
    store: &S,
    renderer: &mut R,
    filter: &CategoryFilter,
) -> Result<SearchSummary>
where
    S: ParameterizedStore + ?Sized,
    R: ResultRenderer + ?Sized,
{
    let plan = validate_and_plan(request, rules)?;
    fetch_and_present(plan, store, renderer, filter)
}

/// Run the pipeline with the store, filter, rules and search log from `config`
pub fn run_search<R>(
    request: RequestFields,
    config: &SearchConfig,
    renderer: &mut R,
) -> Result<SearchOutcome>
where
    R: ResultRenderer + ?Sized,
{
    run_search_with(request, config, renderer, &FsAppendOpener)
}

/// `run_search` with an injected search-log opener
pub fn run_search_with<R, O>(
    request: RequestFields,
    config: &SearchConfig,
    renderer: &mut R,
    opener: &O,
) -> Result<SearchOutcome>
where
    R: ResultRenderer + ?Sized,
    O: AppendOpener + ?Sized,
{
    let request_id = RequestId::new();
    let span = tracing::info_span!("search", request_id = %request_id);
    let _entered = span.enter();

    log_op_start!("run_search");
    let start = Instant::now();

    let result = run_pipeline(request, config, renderer, opener);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok((summary, _)) => log_op_end!(
            "run_search",
            duration_ms = elapsed,
            plan_mode = summary.plan.mode(),
            rows_rendered = summary.rows_rendered as u64
        ),
        Err(e) => log_op_error!("run_search", e, duration_ms = elapsed),
    }

    result.map(|(summary, log_error)| SearchOutcome {
        request_id,
        plan: summary.plan,
        rows_fetched: summary.rows_fetched,
        rows_rendered: summary.rows_rendered,
        log_error,
    })
}

fn run_pipeline<R, O>(
    request: RequestFields,
    config: &SearchConfig,
    renderer: &mut R,
    opener: &O,
) -> Result<(SearchSummary, Option<SearchError>)>
where
    R: ResultRenderer + ?Sized,
    O: AppendOpener + ?Sized,
{
    // The log records what the user typed, before sanitization
    let log_text = search_log_text(&request);

    let plan = validate_and_plan(request, &config.validation_rules())?;

    let log_error = match (config.search_log.enabled, log_text) {
        (true, Some(text)) => timed("log_search", || {
            log_search_with(&text, &config.search_log.path, opener)
        })
        .err(),
        _ => None,
    };
    if let Some(err) = &log_error {
        tracing::warn!(error = %err, "search log append failed; continuing");
    }

    let conn = timed("ensure_connection", || ensure_connection(&config.store))?;
    let summary = fetch_and_present(plan, &conn, renderer, &config.category_filter())?;
    drop(conn);

    Ok((summary, log_error))
}

fn validate_and_plan(request: RequestFields, rules: &ValidationRules) -> Result<QueryPlan> {
    let validated = timed("validate", || validate(request, rules))?;
    timed("plan", || planner::plan(&validated))
}

fn fetch_and_present<S, R>(
    plan: QueryPlan,
    store: &S,
    renderer: &mut R,
    filter: &CategoryFilter,
) -> Result<SearchSummary>
where
    S: ParameterizedStore + ?Sized,
    R: ResultRenderer + ?Sized,
{
    let rows: Vec<ResultRow> = timed("execute", || execute(&plan, store))?;
    let rows_fetched = rows.len();

    log_op_start!("present", rows_fetched = rows_fetched as u64);
    let start = Instant::now();
    let rows_rendered = forumsearch_core::render::present(rows, renderer, filter);
    log_op_end!(
        "present",
        duration_ms = start.elapsed().as_millis() as u64,
        rows_rendered = rows_rendered as u64,
        rows_skipped = (rows_fetched - rows_rendered) as u64
    );

    Ok(SearchSummary {
        plan,
        rows_fetched,
        rows_rendered,
    })
}

/// Raw `query` text, falling back to `q`
fn search_log_text(request: &RequestFields) -> Option<String> {
    ["query", "q"]
        .into_iter()
        .filter_map(|name| request.get_text(name))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn timed<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = elapsed),
        Err(e) => log_op_error!(op, e, duration_ms = elapsed),
    }
    result
}
