//! Core execution span types for the Agentics execution system.
//!
//! Defines `ExecutionSpan`, `SpanTier`, and `SpanStatus` used to build
//! hierarchical execution graphs: Core -> Repo -> Agent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TraceError};

/// Status of an execution span.
///
/// Spans start `Pending` and transition exactly once, at finalization,
/// to either `Success` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStatus {
    Pending,
    Success,
    Failed,
}

impl SpanStatus {
    /// Whether this status is a valid finalization target.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SpanStatus::Pending)
    }
}

impl fmt::Display for SpanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanStatus::Pending => write!(f, "pending"),
            SpanStatus::Success => write!(f, "success"),
            SpanStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Tier of an execution span in the fixed three-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanTier {
    Core,
    Repo,
    Agent,
}

impl fmt::Display for SpanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanTier::Core => write!(f, "core"),
            SpanTier::Repo => write!(f, "repo"),
            SpanTier::Agent => write!(f, "agent"),
        }
    }
}

/// A named side-product attached to the span that produced it.
///
/// Must carry a stable reference (ID, URI, hash, or filename); inline
/// data is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Artifact {
    /// Create an artifact with a stable reference and no inline data.
    pub fn new(
        id: impl Into<String>,
        artifact_type: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            artifact_type: artifact_type.into(),
            reference: reference.into(),
            data: None,
        }
    }

    /// Attach inline data to the artifact.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Kind of machine-checkable evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Hash,
    Uri,
    Id,
}

/// A machine-checkable proof value attached to the span that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub kind: EvidenceKind,
    pub value: String,
}

impl Evidence {
    pub fn new(id: impl Into<String>, kind: EvidenceKind, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: value.into(),
        }
    }
}

/// A single execution span in the Agentics execution graph.
///
/// Spans form a tree: Core -> Repo -> Agent(s). Each span owns its
/// children exclusively; `parent_span_id` is a plain identifier used for
/// validation, never a live back-pointer, so the tree is JSON-serializable
/// without loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSpan {
    pub span_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<Uuid>,
    pub tier: SpanTier,
    pub name: String,
    pub status: SpanStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub artifacts: Vec<Artifact>,
    pub evidence: Vec<Evidence>,
    pub children: Vec<ExecutionSpan>,
}

impl ExecutionSpan {
    fn new(tier: SpanTier, name: &str, parent_span_id: Option<Uuid>) -> Self {
        Self {
            span_id: Uuid::new_v4(),
            parent_span_id,
            tier,
            name: name.to_string(),
            status: SpanStatus::Pending,
            started_at: Utc::now(),
            ended_at: None,
            duration_ms: None,
            error: None,
            artifacts: Vec::new(),
            evidence: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new core-level span.
    ///
    /// `parent_span_id` is absent only when this is the outermost traced
    /// operation with no external caller.
    pub fn new_core(name: &str, parent_span_id: Option<Uuid>) -> Self {
        Self::new(SpanTier::Core, name, parent_span_id)
    }

    /// Create a new repo-level span parented to a core span.
    pub fn new_repo(name: &str, parent_span_id: Uuid) -> Self {
        Self::new(SpanTier::Repo, name, Some(parent_span_id))
    }

    /// Create a new agent-level span parented to a repo span.
    pub fn new_agent(name: &str, parent_span_id: Uuid) -> Self {
        Self::new(SpanTier::Agent, name, Some(parent_span_id))
    }

    /// Whether the span has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Finalize the span with a terminal status, appending any artifacts
    /// and evidence produced by the unit of work.
    ///
    /// Stamps `ended_at` and `duration_ms` exactly once. Finalizing an
    /// already-finalized span, or finalizing with `Pending`, is a caller
    /// bug and returns an error without touching the span. Returns the
    /// same span for chaining.
    pub fn finalize(
        &mut self,
        status: SpanStatus,
        artifacts: Vec<Artifact>,
        evidence: Vec<Evidence>,
    ) -> Result<&mut Self> {
        if self.is_finalized() {
            return Err(TraceError::already_finalized(self.span_id, &self.name));
        }
        if !status.is_terminal() {
            return Err(TraceError::non_terminal_status(
                self.span_id,
                status.to_string(),
            ));
        }

        let now = Utc::now();
        self.status = status;
        self.ended_at = Some(now);
        self.duration_ms = Some((now - self.started_at).num_milliseconds().max(0) as u64);
        self.artifacts.extend(artifacts);
        self.evidence.extend(evidence);
        Ok(self)
    }

    /// Finalize the span as successful.
    pub fn complete(
        &mut self,
        artifacts: Vec<Artifact>,
        evidence: Vec<Evidence>,
    ) -> Result<&mut Self> {
        self.finalize(SpanStatus::Success, artifacts, evidence)
    }

    /// Finalize the span as failed with an error message.
    pub fn fail(
        &mut self,
        error: impl Into<String>,
        artifacts: Vec<Artifact>,
        evidence: Vec<Evidence>,
    ) -> Result<&mut Self> {
        self.finalize(SpanStatus::Failed, artifacts, evidence)?;
        self.error = Some(error.into());
        Ok(self)
    }

    /// Add a child span.
    pub fn add_child(&mut self, child: ExecutionSpan) {
        self.children.push(child);
    }
}
