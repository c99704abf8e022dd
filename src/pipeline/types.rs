use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Sentiment;
use crate::storage::ProcessedItem;

/// Body of `POST /pipeline`. Neither field affects processing.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRequest {
    pub email: String,
    pub source: String,
}

/// Per-item success descriptor returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub original: String,
    pub analysis: String,
    pub sentiment: Sentiment,
    pub stored: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<ProcessedItem> for ItemReport {
    fn from(item: ProcessedItem) -> Self {
        Self {
            original: item.original,
            analysis: item.analysis,
            sentiment: item.sentiment,
            stored: true,
            timestamp: item.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub items: Vec<ItemReport>,
    pub notification_sent: bool,
    pub processed_at: DateTime<Utc>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    pub error: String,
}

/// Result of one run. The two shapes serialize differently; callers
/// tell them apart by the presence of `error`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PipelineOutcome {
    Completed(PipelineReport),
    FetchFailed(FetchFailure),
}
