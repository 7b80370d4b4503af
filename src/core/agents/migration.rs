use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::AgentFailure;
use crate::core::llm::{ChatMessage, LlmProvider};
use crate::core::types::MigrationStatement;

use super::{AgentContext, AgentOutput, OptimizerAgent, parse, prompts};

/// Migration synthesis: idempotent statements populating the optimized
/// schema from the source tables. An empty output is legitimate: the plan
/// may not require any data movement.
pub struct MigrationAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl MigrationAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }
}

#[async_trait]
impl OptimizerAgent for MigrationAgent {
    fn name(&self) -> &'static str {
        "migration"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentOutput, AgentFailure> {
        let Some(schema) = ctx.schema.as_ref() else {
            return Err(AgentFailure::fatal(
                "migration agent invoked without a schema plan",
            ));
        };

        let messages = [
            ChatMessage::system(prompts::SYSTEM),
            ChatMessage::user(prompts::migration_prompt(ctx, schema)),
        ];
        let raw = self
            .provider
            .generate(&self.model, &messages)
            .await
            .map_err(|e| AgentFailure::retryable(format!("completion call failed: {e:#}")))?;

        let statements = parse::split_statements(&raw)
            .into_iter()
            .map(|statement| MigrationStatement { statement })
            .collect();
        Ok(AgentOutput::Migrations(statements))
    }
}
