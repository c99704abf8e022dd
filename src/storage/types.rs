use chrono::{DateTime, SecondsFormat, Utc};

use crate::analysis::Sentiment;

#[derive(Debug, Clone)]
pub struct NewItem {
    pub original: String,
    pub analysis: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone)]
pub struct ProcessedItem {
    pub id: i64,
    pub original: String,
    pub analysis: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

/// Text form used in the `timestamp` column. Matches chrono's serde output.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
