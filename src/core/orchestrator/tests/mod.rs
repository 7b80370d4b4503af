mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::core::agents::OptimizerAgent;
use crate::core::orchestrator::Orchestrator;

/// Orchestrator with test-friendly limits: 2 retries, generous timeout.
pub(crate) fn orchestrator(
    ddl: Arc<dyn OptimizerAgent>,
    query: Arc<dyn OptimizerAgent>,
    migration: Arc<dyn OptimizerAgent>,
) -> Orchestrator {
    Orchestrator::new(
        ddl,
        query,
        migration,
        Arc::new(Semaphore::new(4)),
        Duration::from_secs(5),
        2,
    )
}
