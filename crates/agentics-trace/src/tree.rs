//! Builders that wire span creation, context hand-off, and finalization
//! along the Core -> Repo -> Agent lifecycle.
//!
//! Children are finalized before parents; structural validation runs only
//! once the whole tree exists (see `graph` and `validate`).

use uuid::Uuid;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::result::{build_result, ExecutionResult};
use crate::span::{ExecutionSpan, SpanStatus};

/// Builder for one repo-level subtree.
///
/// Creates the repo span on construction, then collects finalized agent
/// spans. On finalization, the repo span is marked failed if no agent
/// spans were emitted or if any agent failed.
pub struct SpanTreeBuilder {
    repo_span: ExecutionSpan,
    agent_spans: Vec<ExecutionSpan>,
}

impl SpanTreeBuilder {
    /// Create a builder whose repo span is parented per the context.
    pub fn new(ctx: &ExecutionContext, repo_name: &str) -> Self {
        Self {
            repo_span: ExecutionSpan::new_repo(repo_name, ctx.parent_span_id),
            agent_spans: Vec::new(),
        }
    }

    /// Span ID of the repo span under construction.
    pub fn repo_span_id(&self) -> Uuid {
        self.repo_span.span_id
    }

    /// Start a new agent-level span parented to the repo span.
    pub fn start_agent_span(&self, agent_name: &str) -> ExecutionSpan {
        ExecutionSpan::new_agent(agent_name, self.repo_span.span_id)
    }

    /// Add a finalized agent span to the tree.
    ///
    /// Sub-operations running in parallel must guard the builder (for
    /// example behind a `Mutex`) so each child is appended exactly once.
    pub fn add_completed_agent_span(&mut self, span: ExecutionSpan) {
        self.agent_spans.push(span);
    }

    /// Finalize the subtree and return the repo span with its agent
    /// children attached.
    ///
    /// The repo span is marked failed if no agent spans were emitted or
    /// if any agent span failed, and successful otherwise.
    pub fn finalize(mut self) -> Result<ExecutionSpan> {
        if self.agent_spans.is_empty() {
            self.repo_span
                .fail("no agent spans emitted", Vec::new(), Vec::new())?;
        } else if self
            .agent_spans
            .iter()
            .any(|s| s.status == SpanStatus::Failed)
        {
            self.repo_span
                .fail("one or more agent spans failed", Vec::new(), Vec::new())?;
        } else {
            self.repo_span.complete(Vec::new(), Vec::new())?;
        }

        self.repo_span.children = self.agent_spans;
        Ok(self.repo_span)
    }

    /// Finalize the subtree as failed with an explicit error. All
    /// collected agent spans are still attached.
    pub fn finalize_failed(mut self, error: impl Into<String>) -> Result<ExecutionSpan> {
        self.repo_span.fail(error, Vec::new(), Vec::new())?;
        self.repo_span.children = self.agent_spans;
        Ok(self.repo_span)
    }
}

/// Builder for the root of an execution: the core span, the contexts
/// handed to downstream operations, and the final result.
pub struct CoreTreeBuilder {
    execution_id: Uuid,
    core_span: ExecutionSpan,
}

impl CoreTreeBuilder {
    /// Create a builder for an outermost traced operation.
    pub fn new(core_name: &str) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            core_span: ExecutionSpan::new_core(core_name, None),
        }
    }

    /// Create a builder for a core operation invoked by an external
    /// caller whose span is `parent_span_id`.
    pub fn with_parent(core_name: &str, parent_span_id: Uuid) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            core_span: ExecutionSpan::new_core(core_name, Some(parent_span_id)),
        }
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    pub fn core_span_id(&self) -> Uuid {
        self.core_span.span_id
    }

    /// Context to thread into a downstream operation so its spans attach
    /// under the core span.
    pub fn context(&self) -> Result<ExecutionContext> {
        ExecutionContext::new(self.execution_id, self.core_span.span_id, self.core_span.span_id)
    }

    /// Attach a finalized repo-level subtree.
    pub fn attach_repo_span(&mut self, span: ExecutionSpan) {
        self.core_span.add_child(span);
    }

    /// Finalize the core span and return the full tree.
    ///
    /// The core span is marked failed if any repo child failed, and
    /// successful otherwise. Missing repo children are left for the
    /// structural validator to report.
    pub fn finalize(mut self) -> Result<ExecutionSpan> {
        if self
            .core_span
            .children
            .iter()
            .any(|s| s.status == SpanStatus::Failed)
        {
            self.core_span
                .fail("one or more repo spans failed", Vec::new(), Vec::new())?;
        } else {
            self.core_span.complete(Vec::new(), Vec::new())?;
        }
        Ok(self.core_span)
    }

    /// Finalize the core span and build the caller-facing result in one
    /// step, reusing this builder's execution ID.
    pub fn into_result(self) -> Result<ExecutionResult> {
        let execution_id = self.execution_id;
        let core_name = self.core_span.name.clone();
        let core_span = self.finalize()?;
        Ok(build_result(core_span, &core_name, Some(execution_id)))
    }
}
