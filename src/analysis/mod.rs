pub mod enricher;
pub mod sentiment;
pub mod types;

pub use enricher::enrich;
pub use sentiment::Sentiment;
