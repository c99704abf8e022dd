use serde::Serialize;
use std::fmt;

const ENTHUSIASTIC_WORDS: &[&str] = &["good", "great", "excellent", "love"];
const CRITICAL_WORDS: &[&str] = &["bad", "worst", "hate", "terrible"];

/// Keyword-based tone label attached to every processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Enthusiastic,
    Critical,
    Objective,
}

impl Sentiment {
    /// Case-insensitive substring match. Enthusiastic words are checked
    /// first, so text carrying both sets is enthusiastic.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();

        if ENTHUSIASTIC_WORDS.iter().any(|w| lower.contains(w)) {
            Sentiment::Enthusiastic
        } else if CRITICAL_WORDS.iter().any(|w| lower.contains(w)) {
            Sentiment::Critical
        } else {
            Sentiment::Objective
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Enthusiastic => "enthusiastic",
            Sentiment::Critical => "critical",
            Sentiment::Objective => "objective",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
