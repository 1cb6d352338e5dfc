//! Caller-facing execution result assembly.
//!
//! Combines the validation outcome with the raw tree. A structurally
//! broken tree is reported as data on the result, never as an error, so
//! the caller always receives a usable result object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::ExecutionGraph;
use crate::span::{ExecutionSpan, SpanStatus};

/// The caller-facing outcome of one top-level traced operation.
///
/// `status` is the root span's own status unless the graph is
/// structurally invalid, in which case it is forced to `failed` even if
/// every span individually reported success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub core_name: String,
    pub execution_id: Uuid,
    pub status: SpanStatus,
    pub execution_graph: ExecutionGraph,
    pub failure_reasons: Vec<String>,
}

/// Build the execution result for a finalized core span.
///
/// Generates an `execution_id` when none is supplied, assembles and
/// validates the graph, and demotes the reported status to `failed`
/// whenever validation fails. Never errors for a malformed tree.
pub fn build_result(
    core_span: ExecutionSpan,
    core_name: &str,
    execution_id: Option<Uuid>,
) -> ExecutionResult {
    let execution_id = execution_id.unwrap_or_else(Uuid::new_v4);
    let root_status = core_span.status;
    let graph = ExecutionGraph::assemble(execution_id, core_span);

    let status = if graph.valid {
        root_status
    } else {
        tracing::warn!(
            execution_id = %execution_id,
            core_name,
            failures = graph.failure_reasons.len(),
            "execution graph is structurally invalid, demoting result status to failed"
        );
        SpanStatus::Failed
    };

    ExecutionResult {
        core_name: core_name.to_string(),
        execution_id,
        status,
        failure_reasons: graph.failure_reasons.clone(),
        execution_graph: graph,
    }
}
