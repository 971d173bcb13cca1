//! Notion database content source.
//!
//! Lists pages with `POST /databases/{id}/query` and reads page bodies with
//! `GET /blocks/{id}/children`.

use super::blocks::{Block, RichText};
use super::source::{ContentSource, SourceRecord};
use assist_core::config::NotionCredentials;
use assist_core::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public Notion REST endpoint.
pub const DEFAULT_NOTION_ENDPOINT: &str = "https://api.notion.com/v1";

/// API version header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Serialize)]
struct QueryRequest {
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<NotionPage>,
}

#[derive(Debug, Deserialize)]
struct NotionPage {
    id: String,
    #[serde(default)]
    url: String,
    last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    properties: HashMap<String, NotionProperty>,
}

#[derive(Debug, Deserialize)]
struct NotionProperty {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Vec<RichText>,
}

#[derive(Debug, Deserialize)]
struct BlockChildren {
    #[serde(default)]
    results: Vec<Block>,
}

impl NotionPage {
    /// Plain text of the first run of the title property.
    fn title(&self) -> Option<String> {
        self.properties
            .values()
            .find(|prop| prop.kind == "title")
            .and_then(|prop| prop.title.first())
            .map(|run| run.plain_text.clone())
            .filter(|title| !title.trim().is_empty())
    }

    fn into_record(self) -> SourceRecord {
        SourceRecord {
            title: self.title(),
            id: self.id,
            url: self.url,
            last_modified: self.last_edited_time.unwrap_or_else(Utc::now),
        }
    }
}

/// Content source backed by a Notion database.
pub struct NotionSource {
    api_key: String,
    database_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl NotionSource {
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self::with_base_url(api_key, database_id, DEFAULT_NOTION_ENDPOINT)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        database_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            database_id: database_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_credentials(credentials: &NotionCredentials) -> Self {
        match &credentials.endpoint {
            Some(endpoint) => {
                Self::with_base_url(&credentials.api_key, &credentials.database_id, endpoint)
            }
            None => Self::new(&credentials.api_key, &credentials.database_id),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Source(format!(
                "Notion API error while fetching {} ({}): {}",
                what, status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse Notion {}: {}", what, e)))
    }
}

#[async_trait]
impl ContentSource for NotionSource {
    fn name(&self) -> &str {
        "notion"
    }

    async fn list_records(&self, page_size: u32) -> AppResult<Vec<SourceRecord>> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        tracing::debug!(page_size, "Querying Notion database");

        let response = self
            .authorized(self.client.post(&url))
            .json(&QueryRequest { page_size })
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Failed to query Notion database: {}", e)))?;

        let query: QueryResponse = Self::read_json(response, "database pages").await?;
        Ok(query.results.into_iter().map(NotionPage::into_record).collect())
    }

    async fn fetch_blocks(&self, record_id: &str) -> AppResult<Vec<Block>> {
        let url = format!("{}/blocks/{}/children", self.base_url, record_id);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                AppError::Source(format!("Failed to fetch blocks of {}: {}", record_id, e))
            })?;

        let children: BlockChildren = Self::read_json(response, "page blocks").await?;
        Ok(children.results)
    }
}
