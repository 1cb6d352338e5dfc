//! Execution graph assembly: flattening a finalized span tree into an
//! order-preserving index and freezing the validation outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::span::ExecutionSpan;
use crate::validate;

/// Collect every span reachable from `root` exactly once, in pre-order:
/// root first, then each child's subtree in child order.
///
/// Does not mutate the tree; `parent_span_id` is preserved on every
/// collected span. The output is used for audit, debugging, and
/// serialization.
pub fn collect_all(root: &ExecutionSpan) -> Vec<ExecutionSpan> {
    let mut spans = Vec::new();
    collect_into(root, &mut spans);
    spans
}

fn collect_into(span: &ExecutionSpan, out: &mut Vec<ExecutionSpan>) {
    out.push(span.clone());
    for child in &span.children {
        collect_into(child, out);
    }
}

/// The full span tree for one top-level operation, plus its flattened
/// index and validation outcome.
///
/// Built once, after the root core span is finalized; immutable once
/// constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionGraph {
    pub execution_id: Uuid,
    pub root_span: ExecutionSpan,
    pub all_spans: Vec<ExecutionSpan>,
    pub created_at: DateTime<Utc>,
    pub valid: bool,
    pub failure_reasons: Vec<String>,
}

impl ExecutionGraph {
    /// Assemble the graph for a finalized root span: flatten the tree,
    /// run structural validation, and freeze the outcome.
    pub fn assemble(execution_id: Uuid, root_span: ExecutionSpan) -> Self {
        let all_spans = collect_all(&root_span);
        let report = validate::validate(&root_span);

        tracing::debug!(
            execution_id = %execution_id,
            span_count = all_spans.len(),
            valid = report.valid,
            "assembled execution graph"
        );

        Self {
            execution_id,
            root_span,
            all_spans,
            created_at: Utc::now(),
            valid: report.valid,
            failure_reasons: report.failures,
        }
    }
}
