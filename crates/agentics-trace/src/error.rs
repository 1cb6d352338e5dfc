//! Error types for the execution trace engine.
//!
//! Only caller bugs surface here: double finalization, finalizing with a
//! non-terminal status, or constructing a context from nil identifiers.
//! Structural problems in an assembled span tree are reported as data on
//! the `ExecutionGraph`, never as an error.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for trace operations
#[derive(Error, Debug)]
pub enum TraceError {
    /// A span was finalized more than once
    #[error("span {span_id} ({name}) has already been finalized")]
    AlreadyFinalized { span_id: Uuid, name: String },

    /// Finalize was called with a status that is not terminal
    #[error("span {span_id} cannot be finalized with non-terminal status '{status}'")]
    NonTerminalStatus { span_id: Uuid, status: String },

    /// An execution context identifier was missing (nil)
    #[error("execution context field '{0}' is required and must be a non-nil UUID")]
    MissingContextField(&'static str),
}

impl TraceError {
    /// Create an already-finalized error for a span
    pub fn already_finalized(span_id: Uuid, name: impl Into<String>) -> Self {
        TraceError::AlreadyFinalized {
            span_id,
            name: name.into(),
        }
    }

    /// Create a non-terminal status error for a span
    pub fn non_terminal_status(span_id: Uuid, status: impl Into<String>) -> Self {
        TraceError::NonTerminalStatus {
            span_id,
            status: status.into(),
        }
    }
}

/// Result type alias for trace operations
pub type Result<T> = std::result::Result<T, TraceError>;
