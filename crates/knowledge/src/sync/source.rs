//! External content source abstraction.

use super::blocks::Block;
use assist_core::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A page as listed by a content source, before its body is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub id: String,

    /// `None` when the page has no title property or the title is empty
    pub title: Option<String>,

    pub url: String,

    pub last_modified: DateTime<Utc>,
}

/// Where documents come from during a sync.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// List one page of records. Failure here aborts the remote sync.
    async fn list_records(&self, page_size: u32) -> AppResult<Vec<SourceRecord>>;

    /// Fetch the body blocks of one record. Failure drops only that record.
    async fn fetch_blocks(&self, record_id: &str) -> AppResult<Vec<Block>>;
}
