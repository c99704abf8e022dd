use serde::Serialize;

use super::sentiment::Sentiment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    /// Leading excerpt of the source text, always suffixed with "..."
    pub analysis: String,
    pub sentiment: Sentiment,
}
