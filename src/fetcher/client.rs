use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SourceConfig;
use super::types::SourceItem;
use super::ItemSource;

/// Pulls the batch from the configured upstream with a single GET.
pub struct HttpFetcher {
    client: Client,
    url: String,
    max_items: usize,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
            max_items: config.max_items,
        })
    }
}

#[async_trait]
impl ItemSource for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<SourceItem>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Upstream request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Upstream returned {}", status);
        }

        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Upstream response is not a JSON array")?;

        let total = records.len();
        let items = take_items(records, self.max_items)?;
        info!("Fetched {} of {} upstream records from {}", items.len(), total, self.url);

        for item in &items {
            debug!(post_id = ?item.post_id, id = ?item.id, "Upstream record");
        }

        Ok(items)
    }
}

/// Keeps the first `max` records. Records past the cut are never decoded.
fn take_items(records: Vec<serde_json::Value>, max: usize) -> Result<Vec<SourceItem>> {
    records
        .into_iter()
        .take(max)
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .with_context(|| format!("Upstream record {} has no text body", index))
        })
        .collect()
}
