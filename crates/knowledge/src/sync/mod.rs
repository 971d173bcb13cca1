//! Corpus synchronization.
//!
//! A sync pulls records from the configured [`ContentSource`], turns them
//! into documents and swaps them into the [`CorpusStore`]. When no source is
//! configured or listing fails, the local snapshot is loaded instead. A
//! failed snapshot load leaves the current corpus untouched.

pub mod blocks;
pub mod notion;
pub mod snapshot;
pub mod source;

pub use blocks::{extract_text, Block, RichText, TextBlock};
pub use notion::NotionSource;
pub use snapshot::load_snapshot;
pub use source::{ContentSource, SourceRecord};

use crate::store::CorpusStore;
use crate::types::Document;
use assist_core::AppResult;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Largest page the source API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Where the corpus came from after a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOrigin {
    /// Replaced from the content source
    Remote,
    /// Replaced from the local snapshot
    Snapshot,
    /// Neither worked; the previous corpus is still in place
    Unchanged,
}

impl SyncOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOrigin::Remote => "remote",
            SyncOrigin::Snapshot => "snapshot",
            SyncOrigin::Unchanged => "unchanged",
        }
    }
}

/// Outcome of one sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub origin: SyncOrigin,

    /// Documents held by the store once the sync finished
    pub documents: usize,

    /// Records dropped because they had no title, no body, or failed to load
    pub skipped: usize,

    pub duration_secs: f64,
}

/// Refreshes the corpus. The only writer of the store.
pub struct SyncManager {
    store: Arc<CorpusStore>,
    source: Option<Arc<dyn ContentSource>>,
    snapshot_path: PathBuf,
    page_size: u32,
    running: Mutex<()>,
}

impl SyncManager {
    pub fn new(
        store: Arc<CorpusStore>,
        source: Option<Arc<dyn ContentSource>>,
        snapshot_path: impl Into<PathBuf>,
        page_size: u32,
    ) -> Self {
        Self {
            store,
            source,
            snapshot_path: snapshot_path.into(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            running: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<CorpusStore> {
        &self.store
    }

    /// Run one sync. Never fails; problems are logged and reported.
    ///
    /// Concurrent calls run one after another.
    pub async fn sync(&self) -> SyncReport {
        let _running = self.running.lock().await;
        let start = Instant::now();

        let (origin, skipped) = match &self.source {
            None => {
                tracing::info!("No content source configured, using fallback snapshot");
                (self.load_fallback().await, 0)
            }
            Some(source) => match self.fetch_remote(source.as_ref()).await {
                Ok((documents, skipped)) => {
                    let count = self.store.replace_all(documents);
                    tracing::info!(
                        source = source.name(),
                        documents = count,
                        skipped,
                        "Synced documents from content source"
                    );
                    (SyncOrigin::Remote, skipped)
                }
                Err(e) => {
                    tracing::error!(source = source.name(), "Sync failed: {}", e);
                    (self.load_fallback().await, 0)
                }
            },
        };

        SyncReport {
            origin,
            documents: self.store.count(),
            skipped,
            duration_secs: start.elapsed().as_secs_f64(),
        }
    }

    /// List records and build documents. Errors only when listing fails.
    async fn fetch_remote(&self, source: &dyn ContentSource) -> AppResult<(Vec<Document>, usize)> {
        let records = source.list_records(self.page_size).await?;
        tracing::debug!(records = records.len(), "Fetched record list");

        let mut documents = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for record in records {
            match self.build_document(source, record).await {
                Some(doc) => documents.push(doc),
                None => skipped += 1,
            }
        }

        Ok((documents, skipped))
    }

    async fn build_document(
        &self,
        source: &dyn ContentSource,
        record: SourceRecord,
    ) -> Option<Document> {
        let title = match record.title.filter(|t| !t.trim().is_empty()) {
            Some(title) => title,
            None => {
                tracing::warn!(id = %record.id, "Skipping record without a title");
                return None;
            }
        };

        let blocks = match source.fetch_blocks(&record.id).await {
            Ok(blocks) => blocks,
            Err(e) => {
                tracing::warn!(id = %record.id, "Skipping record: {}", e);
                return None;
            }
        };

        let content = extract_text(&blocks);
        if content.is_empty() {
            tracing::warn!(id = %record.id, title = %title, "Skipping record with empty content");
            return None;
        }

        Some(Document {
            id: record.id,
            title,
            content,
            url: record.url,
            last_modified: record.last_modified,
        })
    }

    async fn load_fallback(&self) -> SyncOrigin {
        match load_snapshot(&self.snapshot_path).await {
            Ok(documents) => {
                let count = self.store.replace_all(documents);
                tracing::info!(documents = count, "Loaded fallback snapshot");
                SyncOrigin::Snapshot
            }
            Err(e) => {
                tracing::error!("Failed to load fallback snapshot: {}", e);
                SyncOrigin::Unchanged
            }
        }
    }
}
