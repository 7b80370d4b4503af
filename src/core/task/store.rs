use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskFailure, TaskRecord, TaskState, can_transition};
use crate::core::error::ServiceError;
use crate::core::types::{OptimizationRequest, OptimizationResult};

/// Payload written together with a terminal transition.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed(OptimizationResult),
    Failed(TaskFailure),
}

/// Keyed storage of task records. The single writer is the task manager;
/// readers get snapshots. All mutation happens under one write lock, so a
/// transition either fully lands (state, payload, timestamp) or not at all.
pub struct TaskStore {
    records: RwLock<HashMap<Uuid, TaskRecord>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new PENDING record and return its fresh id.
    pub async fn create(&self, request: Arc<OptimizationRequest>) -> Uuid {
        let id = Uuid::new_v4();
        let record = TaskRecord {
            id,
            state: TaskState::Pending,
            request,
            result: None,
            failure: None,
            created_at: Instant::now(),
            started_at: None,
            finished_at: None,
        };
        self.records.write().await.insert(id, record);
        id
    }

    /// Number of records ever created (the core never deletes).
    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Point-in-time copy of a record.
    pub async fn get(&self, id: Uuid) -> Result<TaskRecord, ServiceError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }

    /// Atomically move a record to `to`, writing the outcome payload and the
    /// matching timestamp in the same step. Exactly one of two racing
    /// terminal transitions wins; the loser gets `InvalidTransition`.
    pub async fn transition(
        &self,
        id: Uuid,
        to: TaskState,
        outcome: Option<TaskOutcome>,
    ) -> Result<(), ServiceError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(ServiceError::NotFound)?;

        let from = record.state;
        if !can_transition(from, to) {
            return Err(ServiceError::InvalidTransition { from, to });
        }

        match (to, outcome) {
            (TaskState::Running, None) => {
                record.started_at = Some(Instant::now());
            }
            (TaskState::Done, Some(TaskOutcome::Completed(result))) => {
                record.result = Some(result);
                record.finished_at = Some(Instant::now());
            }
            (TaskState::Failed, Some(TaskOutcome::Failed(failure))) => {
                record.failure = Some(failure);
                record.finished_at = Some(Instant::now());
            }
            // Payload does not match the target state: refuse the write.
            _ => return Err(ServiceError::InvalidTransition { from, to }),
        }
        record.state = to;
        Ok(())
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
