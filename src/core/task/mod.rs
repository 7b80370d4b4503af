//! Task lifecycle: states, records, the store, and the manager driving
//! pipelines over submitted requests.

mod manager;
mod store;

#[cfg(test)]
mod tests;

pub use manager::TaskManager;
pub use store::{TaskOutcome, TaskStore};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::core::types::{OptimizationRequest, OptimizationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Done,
    Failed,
}

impl TaskState {
    /// Canonical uppercase wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::Running => "RUNNING",
            TaskState::Done => "DONE",
            TaskState::Failed => "FAILED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether a record may move from `from` to `to`. Terminal states
/// absorb: nothing leaves DONE or FAILED.
pub fn can_transition(from: TaskState, to: TaskState) -> bool {
    match from {
        TaskState::Pending => matches!(to, TaskState::Running),
        TaskState::Running => matches!(to, TaskState::Done | TaskState::Failed),
        TaskState::Done | TaskState::Failed => false,
    }
}

/// Terminal failure detail of a failed task.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    /// Name of the agent whose failure terminated the task.
    pub agent: String,
    pub reason: String,
}

/// The durable state of one optimization task. Callers only ever see
/// point-in-time copies; the store owns the live record.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct TaskRecord {
    pub id: Uuid,
    pub state: TaskState,
    pub request: Arc<OptimizationRequest>,
    /// Present iff `state` is DONE.
    pub result: Option<OptimizationResult>,
    /// Present iff `state` is FAILED.
    pub failure: Option<TaskFailure>,
    /// Monotonic timestamps, each set exactly once by the store.
    pub created_at: Instant,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
}
