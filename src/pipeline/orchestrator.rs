use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::analysis::enrich;
use crate::fetcher::{ItemSource, SourceItem};
use crate::storage::{ItemStore, NewItem};
use super::notifier::Notifier;
use super::types::{FetchFailure, ItemReport, PipelineOutcome, PipelineReport, PipelineRequest};

/// Fetch → enrich → store → notify, one batch per call.
pub struct Pipeline {
    source: Arc<dyn ItemSource>,
    store: Arc<dyn ItemStore>,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ItemSource>,
        store: Arc<dyn ItemStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Only a failed fetch ends the run early. Item failures land in `errors`.
    pub async fn run(&self, request: &PipelineRequest) -> PipelineOutcome {
        info!(source = %request.source, "Pipeline run started");

        let fetched = match self.source.fetch().await {
            Ok(items) => items,
            Err(e) => {
                error!("Fetch failed: {:#}", e);
                return PipelineOutcome::FetchFailed(FetchFailure {
                    error: format!("Fetch error: {:#}", e),
                });
            }
        };

        let mut results = Vec::with_capacity(fetched.len());
        for item in fetched {
            results.push(self.process(item).await);
        }

        let (stored, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
        let items: Vec<ItemReport> = stored.into_iter().filter_map(Result::ok).collect();
        let errors: Vec<String> = failed.into_iter().filter_map(Result::err).collect();

        let notification_sent = self.notifier.notify(request, &items).await;

        info!(
            "Pipeline run finished: {} stored, {} failed",
            items.len(),
            errors.len()
        );

        PipelineOutcome::Completed(PipelineReport {
            items,
            notification_sent,
            processed_at: Utc::now(),
            errors,
        })
    }

    async fn process(&self, item: SourceItem) -> Result<ItemReport, String> {
        let enrichment = enrich(&item.body);

        let stored = self
            .store
            .insert(NewItem {
                original: item.body,
                analysis: enrichment.analysis,
                sentiment: enrichment.sentiment,
            })
            .await
            .map_err(|e| {
                warn!(upstream_id = ?item.id, "Failed to store item: {:#}", e);
                format!("{:#}", e)
            })?;

        debug!(id = stored.id, sentiment = %stored.sentiment, "Stored item");
        Ok(stored.into())
    }
}
