//! Orchestration of the agent pipeline: one coherent result per task.
//!
//! Ordering: the DDL agent completes first (schema decisions gate everything
//! else), then the query and migration agents run concurrently over the
//! request plus the schema plan. Retry and fallback policy live here, not in
//! the agents.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::core::agents::{AgentContext, AgentOutput, OptimizerAgent, SchemaPlan};
use crate::core::error::AgentFailure;
use crate::core::task::TaskFailure;
use crate::core::types::{
    DdlStatement, MigrationStatement, OptimizationRequest, OptimizationResult, RewrittenQuery,
};

pub struct Orchestrator {
    ddl: Arc<dyn OptimizerAgent>,
    query: Arc<dyn OptimizerAgent>,
    migration: Arc<dyn OptimizerAgent>,
    /// External limiter on concurrent agent calls; a permit is taken before
    /// every call, across all pipelines sharing this orchestrator.
    agent_permits: Arc<Semaphore>,
    agent_timeout: Duration,
    /// Retries after the first attempt, for retryable failures only.
    retry_limit: u32,
}

impl Orchestrator {
    pub fn new(
        ddl: Arc<dyn OptimizerAgent>,
        query: Arc<dyn OptimizerAgent>,
        migration: Arc<dyn OptimizerAgent>,
        agent_permits: Arc<Semaphore>,
        agent_timeout: Duration,
        retry_limit: u32,
    ) -> Self {
        Self {
            ddl,
            query,
            migration,
            agent_permits,
            agent_timeout,
            retry_limit,
        }
    }

    /// Drive the three agents over one request. A DDL failure fails the
    /// task; query/migration failures degrade to the identity transform.
    pub async fn run(
        &self,
        request: Arc<OptimizationRequest>,
        metadata: Option<String>,
    ) -> Result<OptimizationResult, TaskFailure> {
        let base_ctx = AgentContext::new(request.clone(), metadata);

        let schema = match self.call_with_retry(self.ddl.as_ref(), &base_ctx).await {
            Ok(AgentOutput::Schema(schema)) => schema,
            Ok(_) => {
                return Err(TaskFailure {
                    agent: self.ddl.name().to_string(),
                    reason: "agent returned an output of the wrong kind".to_string(),
                });
            }
            Err(failure) => {
                return Err(TaskFailure {
                    agent: self.ddl.name().to_string(),
                    reason: failure.reason,
                });
            }
        };

        let ctx = base_ctx.with_schema(schema.clone());
        let (queries_outcome, migrations_outcome) = tokio::join!(
            self.call_with_retry(self.query.as_ref(), &ctx),
            self.call_with_retry(self.migration.as_ref(), &ctx),
        );

        // Partial-failure policy: a failed branch degrades its own section
        // only; the task still completes.
        let rewritten = match queries_outcome {
            Ok(AgentOutput::Queries(queries)) => Some(queries),
            Ok(_) => {
                warn!("query agent returned an output of the wrong kind; keeping original SQL");
                None
            }
            Err(failure) => {
                warn!("query agent gave up ({}); keeping original SQL", failure.reason);
                None
            }
        };
        let migrations = match migrations_outcome {
            Ok(AgentOutput::Migrations(migrations)) => migrations,
            Ok(_) => {
                warn!("migration agent returned an output of the wrong kind; emitting none");
                Vec::new()
            }
            Err(failure) => {
                warn!("migration agent gave up ({}); emitting none", failure.reason);
                Vec::new()
            }
        };

        Ok(assemble(&request, schema, rewritten, migrations))
    }

    /// One agent call with bounded retry. A permit is (re)acquired before
    /// each attempt; a timeout counts as a retryable failure.
    async fn call_with_retry(
        &self,
        agent: &dyn OptimizerAgent,
        ctx: &AgentContext,
    ) -> Result<AgentOutput, AgentFailure> {
        let attempts = self.retry_limit + 1;
        let mut last = AgentFailure::retryable("agent was never invoked");
        for attempt in 1..=attempts {
            let permit = self.agent_permits.acquire().await;
            if permit.is_err() {
                return Err(AgentFailure::fatal("agent limiter is closed"));
            }

            let failure = match timeout(self.agent_timeout, agent.run(ctx)).await {
                Ok(Ok(output)) => {
                    info!(agent = agent.name(), attempt, "agent call succeeded");
                    return Ok(output);
                }
                Ok(Err(failure)) => failure,
                Err(_) => AgentFailure::retryable(format!(
                    "timed out after {:?}",
                    self.agent_timeout
                )),
            };

            warn!(
                agent = agent.name(),
                attempt,
                retryable = failure.retryable,
                "agent call failed: {}",
                failure.reason
            );
            if !failure.retryable {
                return Err(failure);
            }
            last = failure;
        }
        Err(last)
    }
}

/// Reconcile agent outputs into the final result: every input query id
/// appears exactly once, in input order, with the original SQL carried
/// through where no usable rewrite exists. Rewrites for unknown ids and
/// duplicate rewrites for one id are dropped.
fn assemble(
    request: &OptimizationRequest,
    schema: SchemaPlan,
    rewritten: Option<Vec<RewrittenQuery>>,
    migrations: Vec<MigrationStatement>,
) -> OptimizationResult {
    let mut by_id: HashMap<&str, &str> = HashMap::new();
    if let Some(rewritten) = rewritten.as_ref() {
        for rewrite in rewritten.iter().filter(|r| !r.query.trim().is_empty()) {
            by_id.entry(rewrite.queryid.as_str()).or_insert(&rewrite.query);
        }
    }

    let queries = request
        .queries
        .iter()
        .map(|spec| RewrittenQuery {
            queryid: spec.queryid.clone(),
            query: by_id
                .remove(spec.queryid.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| spec.query.clone()),
        })
        .collect();

    OptimizationResult {
        ddl: schema
            .statements
            .into_iter()
            .map(|statement| DdlStatement { statement })
            .collect(),
        migrations,
        queries,
    }
}
