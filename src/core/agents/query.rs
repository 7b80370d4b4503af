use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::AgentFailure;
use crate::core::llm::{ChatMessage, LlmProvider};
use crate::core::types::RewrittenQuery;

use super::{AgentContext, AgentOutput, OptimizerAgent, parse, prompts};

#[derive(Deserialize)]
struct QueryReply {
    queryid: String,
    query: String,
}

/// Query rewriting against the optimized schema. May omit queries it sees no
/// beneficial rewrite for; the orchestrator restores those from the input.
pub struct QueryAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl QueryAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }
}

#[async_trait]
impl OptimizerAgent for QueryAgent {
    fn name(&self) -> &'static str {
        "query"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentOutput, AgentFailure> {
        let Some(schema) = ctx.schema.as_ref() else {
            return Err(AgentFailure::fatal(
                "query agent invoked without a schema plan",
            ));
        };

        let messages = [
            ChatMessage::system(prompts::SYSTEM),
            ChatMessage::user(prompts::query_prompt(ctx, schema)),
        ];
        let raw = self
            .provider
            .generate(&self.model, &messages)
            .await
            .map_err(|e| AgentFailure::retryable(format!("completion call failed: {e:#}")))?;

        let block = parse::extract_json_block(&raw)
            .ok_or_else(|| AgentFailure::retryable("query reply contained no JSON array"))?;
        let replies: Vec<QueryReply> = serde_json::from_str(block)
            .map_err(|e| AgentFailure::retryable(format!("query reply was not valid JSON: {e}")))?;

        let rewritten = replies
            .into_iter()
            .filter(|r| !r.query.trim().is_empty())
            .map(|r| RewrittenQuery {
                queryid: r.queryid,
                query: r.query.trim().to_string(),
            })
            .collect();
        Ok(AgentOutput::Queries(rewritten))
    }
}
