//! Lakehouse metadata collaborator.
//!
//! The pipeline treats backend metadata as an opaque blob handed to the
//! agents. Real introspection (table statistics, file layout, partitioning)
//! plugs in behind this trait.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetch an opaque metadata blob for the given connection descriptor.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Default fetcher: hands the agents the connection descriptor unchanged.
pub struct PassthroughFetcher;

#[async_trait]
impl MetadataFetcher for PassthroughFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        Ok(url.to_string())
    }
}
