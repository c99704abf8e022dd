use super::sentiment::Sentiment;
use super::types::Enrichment;

const SUMMARY_CHARS: usize = 100;
const SUMMARY_SUFFIX: &str = "...";

/// First 100 characters of `text` followed by "...". The suffix is added
/// even when nothing was cut off.
pub fn summarize(text: &str) -> String {
    let mut summary: String = text.chars().take(SUMMARY_CHARS).collect();
    summary.push_str(SUMMARY_SUFFIX);
    summary
}

pub fn enrich(text: &str) -> Enrichment {
    Enrichment {
        analysis: summarize(text),
        sentiment: Sentiment::classify(text),
    }
}
