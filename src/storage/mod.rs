pub mod sqlite;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use sqlite::SqliteStore;
pub use types::{NewItem, ProcessedItem};

/// Append-only sink for processed items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists one item, assigning its id and creation timestamp.
    async fn insert(&self, item: NewItem) -> Result<ProcessedItem>;

    async fn count(&self) -> Result<u64>;
}
