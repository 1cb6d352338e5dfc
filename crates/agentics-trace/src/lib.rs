//! Hierarchical execution trace engine for the Agentics ExecutionGraph.
//!
//! Records the lifecycle of one top-level operation as it crosses
//! orchestration boundaries, then proves the recorded tree is well-formed
//! and turns it into a caller-facing result.
//!
//! # Span Hierarchy
//!
//! ```text
//! Core (interface-core)
//!   └─ Repo (one per downstream system, e.g. LLM-Inference-Gateway)
//!       └─ Agent (one per sub-operation, e.g. inference-gateway:infer)
//! ```
//!
//! # Usage
//!
//! 1. Use `CoreTreeBuilder` at the start of a top-level operation; hand its
//!    `ExecutionContext` to each downstream invocation.
//! 2. Use `SpanTreeBuilder` per downstream system to create the repo span
//!    and collect finalized agent spans.
//! 3. Finalize leaves first, then the repo span, then the core span.
//! 4. Use `build_result` (or `CoreTreeBuilder::into_result`) to assemble,
//!    validate, and report. Structural violations come back as data on the
//!    result, never as an error.

pub mod context;
pub mod error;
pub mod graph;
pub mod result;
pub mod span;
pub mod tree;
pub mod validate;

pub use context::ExecutionContext;
pub use error::{Result, TraceError};
pub use graph::{collect_all, ExecutionGraph};
pub use result::{build_result, ExecutionResult};
pub use span::{Artifact, Evidence, EvidenceKind, ExecutionSpan, SpanStatus, SpanTier};
pub use tree::{CoreTreeBuilder, SpanTreeBuilder};
pub use validate::{validate, ValidationReport};
