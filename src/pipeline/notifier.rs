use async_trait::async_trait;
use tracing::info;

use super::types::{ItemReport, PipelineRequest};

/// Downstream hook invoked once per completed batch.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns whether the notification counts as sent.
    async fn notify(&self, request: &PipelineRequest, items: &[ItemReport]) -> bool;
}

/// Sends nothing; records the would-be notification in the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, request: &PipelineRequest, items: &[ItemReport]) -> bool {
        info!(
            recipient = %request.email,
            items = items.len(),
            "Notification skipped (no delivery channel configured)"
        );
        true
    }
}
