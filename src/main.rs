mod core;
mod interfaces;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::info;

use crate::core::agents::{DdlAgent, MigrationAgent, QueryAgent};
use crate::core::config::ServiceConfig;
use crate::core::llm::{LlmProvider, OpenRouterProvider};
use crate::core::metadata::PassthroughFetcher;
use crate::core::orchestrator::Orchestrator;
use crate::core::task::{TaskManager, TaskStore};
use crate::interfaces::web::ApiServer;

#[tokio::main]
async fn main() {
    logging::init();
    if let Err(e) = run().await {
        tracing::error!("fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ServiceConfig::from_env();

    let api_key = config
        .openrouter_api_key
        .clone()
        .context("OPENROUTER_API_KEY is not set")?;
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenRouterProvider::new(
        api_key,
        config.openrouter_base_url.clone(),
    ));

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(DdlAgent::new(provider.clone(), config.model.clone())),
        Arc::new(QueryAgent::new(provider.clone(), config.model.clone())),
        Arc::new(MigrationAgent::new(provider.clone(), config.model.clone())),
        Arc::new(Semaphore::new(config.max_concurrent_agent_calls)),
        config.agent_timeout,
        config.agent_retries,
    ));

    let manager = Arc::new(TaskManager::new(
        Arc::new(TaskStore::new()),
        orchestrator,
        Arc::new(PassthroughFetcher),
        config.max_concurrent_tasks,
    ));

    info!(
        "Starting lakeshift (model: {}, agent timeout: {:?})",
        config.model, config.agent_timeout
    );
    ApiServer::new(manager, config.host.clone(), config.port)
        .serve()
        .await
}
