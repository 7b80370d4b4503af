//! Deterministic doubles shared by the agent, orchestrator, and router tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use crate::core::error::AgentFailure;
use crate::core::llm::{ChatMessage, LlmProvider};
use crate::core::types::{DdlStatement, MigrationStatement, OptimizationRequest, QuerySpec, RewrittenQuery};

use super::{AgentContext, AgentOutput, OptimizerAgent, SchemaPlan};

/// Provider double that replies with one fixed completion.
pub(crate) struct StaticProvider {
    reply: String,
}

impl StaticProvider {
    pub(crate) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for StaticProvider {
    async fn generate(&self, _model_id: &str, _messages: &[ChatMessage]) -> Result<String> {
        Ok(self.reply.clone())
    }
}

/// Agent double: pops one scripted outcome per call and counts invocations.
/// When the script runs dry it falls back to `fallback`, or panics if none
/// was configured.
pub(crate) struct ScriptedAgent {
    name: &'static str,
    script: Mutex<VecDeque<Result<AgentOutput, AgentFailure>>>,
    fallback: Option<Result<AgentOutput, AgentFailure>>,
    delay: Option<std::time::Duration>,
    calls: AtomicUsize,
}

impl ScriptedAgent {
    pub(crate) fn new(
        name: &'static str,
        script: Vec<Result<AgentOutput, AgentFailure>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(script.into()),
            fallback: None,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// An agent that replies the same way on every call.
    pub(crate) fn always(
        name: &'static str,
        outcome: Result<AgentOutput, AgentFailure>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(VecDeque::new()),
            fallback: Some(outcome),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// An agent that sleeps before every reply, keeping its task observably
    /// non-terminal for the duration.
    pub(crate) fn slow(
        name: &'static str,
        outcome: Result<AgentOutput, AgentFailure>,
        delay: std::time::Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(VecDeque::new()),
            fallback: Some(outcome),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OptimizerAgent for ScriptedAgent {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, _ctx: &AgentContext) -> Result<AgentOutput, AgentFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted.or_else(|| self.fallback.clone()) {
            Some(outcome) => outcome,
            None => panic!("script exhausted for agent '{}'", self.name),
        }
    }
}

pub(crate) fn sample_request() -> OptimizationRequest {
    OptimizationRequest {
        url: "trino://localhost:8080/iceberg".to_string(),
        ddl: vec![DdlStatement {
            statement: "CREATE TABLE flights (id INT, origin VARCHAR(3))".to_string(),
        }],
        queries: vec![
            QuerySpec {
                queryid: "q_rare".to_string(),
                query: "SELECT count(*) FROM flights".to_string(),
                runquantity: 2,
                executiontime: 1,
            },
            QuerySpec {
                queryid: "q_top".to_string(),
                query: "SELECT origin, count(*) FROM flights GROUP BY origin".to_string(),
                runquantity: 795,
                executiontime: 20,
            },
        ],
    }
}

pub(crate) fn sample_context() -> AgentContext {
    AgentContext::new(Arc::new(sample_request()), None)
}

pub(crate) fn sample_schema() -> SchemaPlan {
    SchemaPlan {
        plan: "move flights into an optimized schema keyed by origin".to_string(),
        statements: vec![
            "CREATE SCHEMA IF NOT EXISTS iceberg.optimized;".to_string(),
            "CREATE TABLE iceberg.optimized.flights (id BIGINT, origin VARCHAR) WITH (format = 'PARQUET');".to_string(),
        ],
    }
}

pub(crate) fn schema_output() -> AgentOutput {
    AgentOutput::Schema(sample_schema())
}

pub(crate) fn queries_output(pairs: &[(&str, &str)]) -> AgentOutput {
    AgentOutput::Queries(
        pairs
            .iter()
            .map(|(id, sql)| RewrittenQuery {
                queryid: id.to_string(),
                query: sql.to_string(),
            })
            .collect(),
    )
}

pub(crate) fn migrations_output(statements: &[&str]) -> AgentOutput {
    AgentOutput::Migrations(
        statements
            .iter()
            .map(|s| MigrationStatement {
                statement: s.to_string(),
            })
            .collect(),
    )
}
