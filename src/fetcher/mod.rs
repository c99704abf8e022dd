pub mod client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use client::HttpFetcher;
pub use types::SourceItem;

/// Upstream that supplies the raw records for one pipeline run.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<SourceItem>>;
}
