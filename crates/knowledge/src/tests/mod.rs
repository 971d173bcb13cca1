//! Shared test doubles and pipeline-level tests.


use crate::sync::{Block, ContentSource, SourceRecord, TextBlock};
use crate::types::Document;
use assist_core::{AppError, AppResult};
use assist_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn doc(id: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        url: format!("https://example.edu/{}", id),
        last_modified: Utc::now(),
    }
}

/// Write `documents` as a snapshot file under `dir` and return its path.
pub(crate) fn write_snapshot(dir: &Path, documents: &[Document]) -> PathBuf {
    let path = dir.join("fallback_documents.json");
    std::fs::write(&path, serde_json::to_string_pretty(documents).unwrap()).unwrap();
    path
}

struct StubPage {
    record: SourceRecord,
    /// `None` makes block fetching fail
    blocks: Option<Vec<Block>>,
}

/// In-memory content source.
#[derive(Default)]
pub(crate) struct StubSource {
    pages: Vec<StubPage>,
    fail_listing: bool,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    last_page_size: Mutex<Option<u32>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Source whose listing always fails.
    pub(crate) fn failing() -> Self {
        Self {
            fail_listing: true,
            ..Self::default()
        }
    }

    /// Add a page whose body is one paragraph per entry of `paragraphs`.
    pub(crate) fn with_page(mut self, id: &str, title: Option<&str>, paragraphs: &[&str]) -> Self {
        let blocks = paragraphs
            .iter()
            .map(|text| Block::Paragraph {
                paragraph: TextBlock::new(&[*text]),
            })
            .collect();
        self.pages.push(StubPage {
            record: record(id, title),
            blocks: Some(blocks),
        });
        self
    }

    pub(crate) fn with_broken_page(mut self, id: &str, title: &str) -> Self {
        self.pages.push(StubPage {
            record: record(id, Some(title)),
            blocks: None,
        });
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn last_page_size(&self) -> Option<u32> {
        *self.last_page_size.lock().unwrap()
    }
}

fn record(id: &str, title: Option<&str>) -> SourceRecord {
    SourceRecord {
        id: id.to_string(),
        title: title.map(str::to_string),
        url: format!("https://notion.so/{}", id),
        last_modified: Utc::now(),
    }
}

#[async_trait]
impl ContentSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn list_records(&self, page_size: u32) -> AppResult<Vec<SourceRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_page_size.lock().unwrap() = Some(page_size);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_listing {
            return Err(AppError::Source("503 Service Unavailable".to_string()));
        }

        Ok(self
            .pages
            .iter()
            .take(page_size as usize)
            .map(|page| page.record.clone())
            .collect())
    }

    async fn fetch_blocks(&self, record_id: &str) -> AppResult<Vec<Block>> {
        self.pages
            .iter()
            .find(|page| page.record.id == record_id)
            .and_then(|page| page.blocks.clone())
            .ok_or_else(|| AppError::Source(format!("blocks of {} unavailable", record_id)))
    }
}

enum StubBehavior {
    Reply(String),
    Fail,
    Slow(Duration),
}

/// Scripted text-generation client that records its requests.
pub(crate) struct StubClient {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<LlmRequest>>,
}

impl StubClient {
    fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn reply(text: &str) -> Self {
        Self::with_behavior(StubBehavior::Reply(text.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self::with_behavior(StubBehavior::Fail)
    }

    /// Client that takes `delay` before answering.
    pub(crate) fn slow(delay: Duration) -> Self {
        Self::with_behavior(StubBehavior::Slow(delay))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<LlmRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for StubClient {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let content = match &self.behavior {
            StubBehavior::Reply(text) => text.clone(),
            StubBehavior::Fail => {
                return Err(AppError::Llm("429 Too Many Requests".to_string()))
            }
            StubBehavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                "late answer".to_string()
            }
        };

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}
