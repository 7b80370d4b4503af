//! HTTP surface: a thin transport over the task manager.

mod handlers;
mod router;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::core::task::TaskManager;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) manager: Arc<TaskManager>,
}

pub struct ApiServer {
    manager: Arc<TaskManager>,
    host: String,
    port: u16,
}

impl ApiServer {
    pub fn new(manager: Arc<TaskManager>, host: String, port: u16) -> Self {
        Self {
            manager,
            host,
            port,
        }
    }

    pub async fn serve(self) -> Result<()> {
        let state = AppState {
            manager: self.manager,
        };
        let app = router::build_router(state);

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("API server running at http://{addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
