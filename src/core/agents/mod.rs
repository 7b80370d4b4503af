//! Specialized reasoning agents: schema/DDL optimization, query rewriting,
//! migration synthesis.
//!
//! Each agent is one typed, possibly-failing reasoning step over an
//! [`AgentContext`]. Agents hold no state across invocations; everything
//! they may observe travels in the context.

mod ddl;
mod migration;
mod parse;
mod prompts;
mod query;

#[cfg(test)]
pub(crate) mod testutil;

pub use ddl::DdlAgent;
pub use migration::MigrationAgent;
pub use query::QueryAgent;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::AgentFailure;
use crate::core::types::{MigrationStatement, OptimizationRequest, RewrittenQuery};

/// The slice of a task an agent sees: the original request, the opaque
/// lakehouse metadata blob, and (for downstream agents) the schema the
/// DDL agent produced.
#[derive(Debug, Clone)]
pub struct AgentContext {
    pub request: Arc<OptimizationRequest>,
    pub metadata: Option<String>,
    pub schema: Option<SchemaPlan>,
}

impl AgentContext {
    pub fn new(request: Arc<OptimizationRequest>, metadata: Option<String>) -> Self {
        Self {
            request,
            metadata,
            schema: None,
        }
    }

    pub fn with_schema(&self, schema: SchemaPlan) -> Self {
        Self {
            request: self.request.clone(),
            metadata: self.metadata.clone(),
            schema: Some(schema),
        }
    }
}

/// Natural-language optimization plan plus the revised DDL it calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPlan {
    pub plan: String,
    pub statements: Vec<String>,
}

/// Closed set of agent outputs. The orchestrator matches on the variant it
/// expects; a mismatch is a contract violation, not a transient fault.
#[derive(Debug, Clone)]
pub enum AgentOutput {
    Schema(SchemaPlan),
    Queries(Vec<RewrittenQuery>),
    Migrations(Vec<MigrationStatement>),
}

#[async_trait]
pub trait OptimizerAgent: Send + Sync {
    /// Agent name used in logs and failure detail.
    fn name(&self) -> &'static str;

    /// Run one reasoning step over the context.
    async fn run(&self, ctx: &AgentContext) -> Result<AgentOutput, AgentFailure>;
}
