use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::config::StorageConfig;
use super::types::{format_timestamp, NewItem, ProcessedItem};
use super::ItemStore;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS processed_items (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        original  TEXT NOT NULL,
        analysis  TEXT NOT NULL,
        sentiment TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
";

/// Single long-lived SQLite connection shared by every request.
///
/// Inserts are serialised by the mutex and run on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(config: &StorageConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let conn = Connection::open(&config.db_path)
            .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to enable WAL")?;

        let store = Self::init(conn)?;
        info!("Storage ready at {}", config.db_path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to create processed_items table")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        // Poisoning is ignored; a panicked closure leaves no connection state behind
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        f(&conn)
    }

    #[cfg(test)]
    pub fn rows(&self) -> Result<Vec<(i64, String, String, String, String)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, original, analysis, sentiment, timestamp
                 FROM processed_items ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }
}

#[async_trait]
impl ItemStore for SqliteStore {
    async fn insert(&self, item: NewItem) -> Result<ProcessedItem> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.with_conn(|conn| {
                let timestamp = Utc::now();
                conn.execute(
                    "INSERT INTO processed_items (original, analysis, sentiment, timestamp)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        item.original,
                        item.analysis,
                        item.sentiment.label(),
                        format_timestamp(&timestamp),
                    ],
                )
                .context("Failed to insert processed item")?;

                Ok(ProcessedItem {
                    id: conn.last_insert_rowid(),
                    original: item.original,
                    analysis: item.analysis,
                    sentiment: item.sentiment,
                    timestamp,
                })
            })
        })
        .await
        .context("Storage task failed")?
    }

    async fn count(&self) -> Result<u64> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.with_conn(|conn| {
                let count: i64 = conn
                    .query_row("SELECT COUNT(*) FROM processed_items", [], |row| row.get(0))
                    .context("Failed to count processed items")?;
                Ok(count as u64)
            })
        })
        .await
        .context("Storage task failed")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sentiment;

    fn new_item(text: &str, sentiment: Sentiment) -> NewItem {
        NewItem {
            original: text.to_string(),
            analysis: format!("{}...", text),
            sentiment,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.insert(new_item("one", Sentiment::Objective)).await.unwrap();
        let second = store.insert(new_item("two", Sentiment::Critical)).await.unwrap();

        assert!(second.id > first.id);
        assert!(second.timestamp >= first.timestamp);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn persists_all_columns() {
        let store = SqliteStore::open_in_memory().unwrap();

        let stored = store
            .insert(new_item("I love it", Sentiment::Enthusiastic))
            .await
            .unwrap();

        let rows = store.rows().unwrap();
        assert_eq!(rows.len(), 1);
        let (id, original, analysis, sentiment, timestamp) = &rows[0];
        assert_eq!(*id, stored.id);
        assert_eq!(original, "I love it");
        assert_eq!(analysis, "I love it...");
        assert_eq!(sentiment, "enthusiastic");
        assert_eq!(timestamp, &format_timestamp(&stored.timestamp));
        assert!(timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn identical_items_are_not_deduplicated() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.insert(new_item("same", Sentiment::Objective)).await.unwrap();
        store.insert(new_item("same", Sentiment::Objective)).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            db_path: dir.path().join("nested").join("data.db"),
        };

        {
            let store = SqliteStore::open(&config).unwrap();
            store.insert(new_item("kept", Sentiment::Objective)).await.unwrap();
        }

        let reopened = SqliteStore::open(&config).unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        let next = reopened.insert(new_item("next", Sentiment::Objective)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn keeps_serving_after_a_panic_while_locked() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn.clone();
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("writer crashed while holding the connection");
        })
        .join();
        assert!(store.conn.is_poisoned());

        let stored = store.insert(new_item("after", Sentiment::Objective)).await.unwrap();

        assert_eq!(stored.id, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[test]
    fn opening_a_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            db_path: dir.path().to_path_buf(),
        };

        assert!(SqliteStore::open(&config).is_err());
    }
}
