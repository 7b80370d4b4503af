//! Typed error taxonomy for the task service.

use thiserror::Error;

use crate::core::task::TaskState;

/// Errors surfaced to API callers and the task manager.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Malformed or empty submission. Rejected synchronously; no task record
    /// is created.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no task found for the given id")]
    NotFound,

    /// Result requested while the task is still PENDING or RUNNING.
    #[error("task has not reached a terminal state yet")]
    NotReady,

    /// A state-machine violation inside the store. Losing a terminal race
    /// surfaces as this; it never reaches an API caller under normal
    /// operation.
    #[error("invalid task state transition: {from} -> {to}")]
    InvalidTransition { from: TaskState, to: TaskState },

    /// Terminal task failure, wrapping the agent failure that caused it.
    #[error("task failed in {agent} agent: {reason}")]
    TaskFailed { agent: String, reason: String },
}

/// A failed agent invocation. Retryable failures are eligible for bounded
/// retry inside the orchestrator; non-retryable ones abort the agent's
/// branch immediately.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct AgentFailure {
    pub reason: String,
    pub retryable: bool,
}

impl AgentFailure {
    pub fn retryable(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            retryable: true,
        }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            retryable: false,
        }
    }
}
