//! Test doubles shared by the unit tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::Router;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::fetcher::{ItemSource, SourceItem};
use crate::pipeline::notifier::Notifier;
use crate::pipeline::types::{ItemReport, PipelineRequest};
use crate::storage::{ItemStore, NewItem, ProcessedItem, SqliteStore};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// URL of a local port with nothing listening on it.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/comments", addr)
}

pub struct StaticSource {
    items: Vec<SourceItem>,
}

impl StaticSource {
    pub fn bodies(bodies: &[&str]) -> Self {
        Self {
            items: bodies.iter().map(|b| SourceItem::new(*b)).collect(),
        }
    }
}

#[async_trait]
impl ItemSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<SourceItem>> {
        Ok(self.items.clone())
    }
}

pub struct FailingSource {
    message: String,
}

impl FailingSource {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ItemSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<SourceItem>> {
        Err(anyhow!("{}", self.message))
    }
}

/// In-memory SQLite store that rejects the inserts at the given call indices.
pub struct FlakyStore {
    inner: SqliteStore,
    fail_on: HashSet<usize>,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_on(indices: &[usize]) -> Self {
        Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            fail_on: indices.iter().copied().collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ItemStore for FlakyStore {
    async fn insert(&self, item: NewItem) -> Result<ProcessedItem> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&index) {
            anyhow::bail!("disk I/O error on insert {}", index);
        }
        self.inner.insert(item).await
    }

    async fn count(&self) -> Result<u64> {
        self.inner.count().await
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(String, usize)>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, usize)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, request: &PipelineRequest, items: &[ItemReport]) -> bool {
        self.seen
            .lock()
            .unwrap()
            .push((request.email.clone(), items.len()));
        true
    }
}
