pub mod notifier;
pub mod orchestrator;
pub mod types;

pub use notifier::LogNotifier;
pub use orchestrator::Pipeline;
pub use types::{PipelineOutcome, PipelineRequest};
