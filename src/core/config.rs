//! Service configuration sourced from environment variables.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind address for the HTTP API.
    pub host: String,
    pub port: u16,
    /// OpenRouter credentials. The service refuses to start without a key.
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    /// Model id passed to the provider for every agent call.
    pub model: String,
    /// Wall-clock bound on a single agent call. Elapse counts as a
    /// retryable failure.
    pub agent_timeout: Duration,
    /// Retries after the first attempt, for retryable failures only.
    pub agent_retries: u32,
    /// Upper bound on optimization pipelines running at once.
    pub max_concurrent_tasks: usize,
    /// Upper bound on in-flight agent calls across all pipelines.
    pub max_concurrent_agent_calls: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            openrouter_api_key: None,
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            agent_timeout: Duration::from_secs(120),
            agent_retries: 2,
            max_concurrent_tasks: 8,
            max_concurrent_agent_calls: 8,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("LAKESHIFT_HOST", defaults.host),
            port: env_parsed("LAKESHIFT_PORT", defaults.port),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            openrouter_base_url: env_or("OPENROUTER_BASE_URL", defaults.openrouter_base_url),
            model: env_or("LAKESHIFT_MODEL", defaults.model),
            agent_timeout: Duration::from_secs(env_parsed(
                "LAKESHIFT_AGENT_TIMEOUT_SECS",
                defaults.agent_timeout.as_secs(),
            )),
            agent_retries: env_parsed("LAKESHIFT_AGENT_RETRIES", defaults.agent_retries),
            max_concurrent_tasks: env_parsed(
                "LAKESHIFT_MAX_TASKS",
                defaults.max_concurrent_tasks,
            ),
            max_concurrent_agent_calls: env_parsed(
                "LAKESHIFT_MAX_AGENT_CALLS",
                defaults.max_concurrent_agent_calls,
            ),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
