//! Query executor
//!
//! Runs a `QueryPlan` through the store's native parameter binding. The
//! plan's template is fixed; its single parameter is never spliced into it.

use crate::db::ParameterizedStore;
use forumsearch_core::errors::Result;
use forumsearch_core::model::ResultRow;
use forumsearch_core::planner::QueryPlan;

/// Execute `plan` against `store`
///
/// Rows come back in store order. No retry: a failure is returned as
/// `SearchError::Execution` and the caller decides how to present it.
pub fn execute<S>(plan: &QueryPlan, store: &S) -> Result<Vec<ResultRow>>
where
    S: ParameterizedStore + ?Sized,
{
    tracing::debug!(plan_mode = plan.mode(), template = plan.template(), "executing plan");
    store.query(plan.template(), plan.param())
}
