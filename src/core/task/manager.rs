use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, warn};
use uuid::Uuid;

use super::{TaskOutcome, TaskState, TaskStore};
use crate::core::error::ServiceError;
use crate::core::metadata::MetadataFetcher;
use crate::core::orchestrator::Orchestrator;
use crate::core::types::{OptimizationRequest, OptimizationResult};

/// Public entry point of the task service: validates submissions, creates
/// records, schedules pipeline execution, and answers status/result queries.
pub struct TaskManager {
    store: Arc<TaskStore>,
    orchestrator: Arc<Orchestrator>,
    metadata: Arc<dyn MetadataFetcher>,
    task_permits: Arc<Semaphore>,
}

impl TaskManager {
    pub fn new(
        store: Arc<TaskStore>,
        orchestrator: Arc<Orchestrator>,
        metadata: Arc<dyn MetadataFetcher>,
        max_concurrent_tasks: usize,
    ) -> Self {
        Self {
            store,
            orchestrator,
            metadata,
            task_permits: Arc::new(Semaphore::new(max_concurrent_tasks)),
        }
    }

    /// Validate and register a new task, schedule its pipeline, and return
    /// the task id without waiting for execution.
    pub async fn submit(&self, request: OptimizationRequest) -> Result<Uuid, ServiceError> {
        request.validate()?;
        let request = Arc::new(request);
        let id = self.store.create(request.clone()).await;

        let store = self.store.clone();
        let orchestrator = self.orchestrator.clone();
        let metadata = self.metadata.clone();
        let permits = self.task_permits.clone();
        tokio::spawn(async move {
            // Queued tasks stay PENDING until a slot frees up.
            let Ok(_permit) = permits.acquire_owned().await else {
                return; // semaphore closed: process shutting down
            };
            execute_task(store, orchestrator, metadata, id, request).await;
        });

        Ok(id)
    }

    /// Current lifecycle state of a task.
    pub async fn status(&self, id: Uuid) -> Result<TaskState, ServiceError> {
        Ok(self.store.get(id).await?.state)
    }

    /// Stored result of a DONE task. FAILED tasks surface their failure
    /// detail as `TaskFailed`; non-terminal tasks as `NotReady`.
    pub async fn result(&self, id: Uuid) -> Result<OptimizationResult, ServiceError> {
        let record = self.store.get(id).await?;
        if !record.state.is_terminal() {
            return Err(ServiceError::NotReady);
        }
        match (record.state, record.result, record.failure) {
            (TaskState::Done, Some(result), _) => Ok(result),
            (TaskState::Failed, _, Some(failure)) => Err(ServiceError::TaskFailed {
                agent: failure.agent,
                reason: failure.reason,
            }),
            // Unreachable: the store writes the payload in the same atomic
            // step as the terminal transition.
            _ => Err(ServiceError::NotReady),
        }
    }
}

/// One task's pipeline: RUNNING → orchestrator → DONE or FAILED. Transition
/// errors here are programming errors; they are logged and never propagate
/// to unrelated tasks.
async fn execute_task(
    store: Arc<TaskStore>,
    orchestrator: Arc<Orchestrator>,
    metadata: Arc<dyn MetadataFetcher>,
    id: Uuid,
    request: Arc<OptimizationRequest>,
) {
    if let Err(e) = store.transition(id, TaskState::Running, None).await {
        error!("task {id}: could not enter RUNNING: {e}");
        return;
    }

    let metadata_blob = match metadata.fetch(&request.url).await {
        Ok(blob) => Some(blob),
        Err(e) => {
            warn!("task {id}: metadata fetch failed, continuing without: {e:#}");
            None
        }
    };

    let outcome = match orchestrator.run(request, metadata_blob).await {
        Ok(result) => store
            .transition(id, TaskState::Done, Some(TaskOutcome::Completed(result)))
            .await,
        Err(failure) => store
            .transition(id, TaskState::Failed, Some(TaskOutcome::Failed(failure)))
            .await,
    };
    if let Err(e) = outcome {
        error!("task {id}: could not record terminal state: {e}");
    }
}
