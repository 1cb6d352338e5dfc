//! Execution context threaded from the Core to nested operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TraceError};
use crate::span::ExecutionSpan;

/// Addressing token handed to a nested operation so that any spans it
/// creates can declare correct parentage.
///
/// Immutable once built; carries no mutable state and is not retained
/// beyond the call it accompanies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Unique identifier for the overall execution.
    pub execution_id: Uuid,
    /// Span ID of the root core-level span of this execution.
    pub core_span_id: Uuid,
    /// Span ID of the span that invoked the nested operation.
    pub parent_span_id: Uuid,
}

impl ExecutionContext {
    /// Build a context. All three identifiers are required and must be
    /// non-nil; there is no further validation.
    pub fn new(execution_id: Uuid, core_span_id: Uuid, parent_span_id: Uuid) -> Result<Self> {
        if execution_id.is_nil() {
            return Err(TraceError::MissingContextField("execution_id"));
        }
        if core_span_id.is_nil() {
            return Err(TraceError::MissingContextField("core_span_id"));
        }
        if parent_span_id.is_nil() {
            return Err(TraceError::MissingContextField("parent_span_id"));
        }
        Ok(Self {
            execution_id,
            core_span_id,
            parent_span_id,
        })
    }

    /// Derive the context to hand one level down: same execution and core
    /// identifiers, parent re-pointed at the given span.
    pub fn child_of(&self, span: &ExecutionSpan) -> Self {
        Self {
            execution_id: self.execution_id,
            core_span_id: self.core_span_id,
            parent_span_id: span.span_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let exec_id = Uuid::new_v4();
        let core_id = Uuid::new_v4();
        let parent_id = Uuid::new_v4();

        let ctx = ExecutionContext::new(exec_id, core_id, parent_id).unwrap();
        assert_eq!(ctx.execution_id, exec_id);
        assert_eq!(ctx.core_span_id, core_id);
        assert_eq!(ctx.parent_span_id, parent_id);
    }

    #[test]
    fn test_nil_identifiers_are_rejected() {
        let id = Uuid::new_v4();

        let err = ExecutionContext::new(Uuid::nil(), id, id).unwrap_err();
        assert!(err.to_string().contains("execution_id"));

        let err = ExecutionContext::new(id, Uuid::nil(), id).unwrap_err();
        assert!(err.to_string().contains("core_span_id"));

        let err = ExecutionContext::new(id, id, Uuid::nil()).unwrap_err();
        assert!(err.to_string().contains("parent_span_id"));
    }

    #[test]
    fn test_child_of_repoints_parent() {
        let ctx =
            ExecutionContext::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()).unwrap();
        let repo = ExecutionSpan::new_repo("LLM-Inference-Gateway", ctx.parent_span_id);
        let child_ctx = ctx.child_of(&repo);

        assert_eq!(child_ctx.execution_id, ctx.execution_id);
        assert_eq!(child_ctx.core_span_id, ctx.core_span_id);
        assert_eq!(child_ctx.parent_span_id, repo.span_id);
    }

    #[test]
    fn test_context_json_roundtrip() {
        let ctx =
            ExecutionContext::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()).unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ExecutionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.execution_id, ctx.execution_id);
        assert_eq!(back.parent_span_id, ctx.parent_span_id);
    }
}
