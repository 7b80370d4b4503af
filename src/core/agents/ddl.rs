use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::AgentFailure;
use crate::core::llm::{ChatMessage, LlmProvider};

use super::{AgentContext, AgentOutput, OptimizerAgent, SchemaPlan, parse, prompts};

#[derive(Deserialize)]
struct SchemaReply {
    plan: String,
    ddl: Vec<String>,
}

/// Schema optimization: analyzes the request and produces an optimization
/// plan plus the revised DDL. Runs first in the pipeline; the query and
/// migration agents depend on its output.
pub struct DdlAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl DdlAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }
}

#[async_trait]
impl OptimizerAgent for DdlAgent {
    fn name(&self) -> &'static str {
        "ddl"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentOutput, AgentFailure> {
        let messages = [
            ChatMessage::system(prompts::SYSTEM),
            ChatMessage::user(prompts::schema_prompt(ctx)),
        ];
        let raw = self
            .provider
            .generate(&self.model, &messages)
            .await
            .map_err(|e| AgentFailure::retryable(format!("completion call failed: {e:#}")))?;

        let block = parse::extract_json_block(&raw)
            .ok_or_else(|| AgentFailure::retryable("schema reply contained no JSON object"))?;
        let reply: SchemaReply = serde_json::from_str(block)
            .map_err(|e| AgentFailure::retryable(format!("schema reply was not valid JSON: {e}")))?;

        let statements: Vec<String> = reply
            .ddl
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if statements.is_empty() {
            return Err(AgentFailure::retryable(
                "schema reply contained no DDL statements",
            ));
        }

        Ok(AgentOutput::Schema(SchemaPlan {
            plan: reply.plan,
            statements,
        }))
    }
}
