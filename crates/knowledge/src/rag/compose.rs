//! Answer composition.
//!
//! Retrieved documents are rendered into the answer prompt and sent to the
//! text-generation provider. When no provider is configured, or the call
//! fails, times out or comes back blank, an extractive answer is built from
//! the top document instead. Callers always get an [`Answer`].

use crate::rag::types::{confidence, Answer, AnswerMode, SourceRef};
use crate::types::Document;
use assist_core::{AppError, AppResult};
use assist_llm::{LlmClient, LlmRequest};
use assist_prompt::{build_prompt, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Characters of the top document quoted in an extractive answer.
pub const EXCERPT_CHARS: usize = 300;

/// Documents cited by an extractive answer.
pub const EXTRACTIVE_SOURCES: usize = 2;

/// Parameters for the generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-pro".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

/// Turns retrieved documents into an [`Answer`].
pub struct AnswerComposer {
    client: Option<Arc<dyn LlmClient>>,
    prompt: PromptDefinition,
    settings: GenerationSettings,
}

impl AnswerComposer {
    /// `client` of `None` means every answer is extractive.
    pub fn new(
        client: Option<Arc<dyn LlmClient>>,
        prompt: PromptDefinition,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            client,
            prompt,
            settings,
        }
    }

    pub fn has_generator(&self) -> bool {
        self.client.is_some()
    }

    pub async fn compose(&self, query: &str, documents: &[Document]) -> Answer {
        if documents.is_empty() {
            return Answer::no_knowledge();
        }

        let Some(client) = &self.client else {
            tracing::debug!("No text generation provider, using extractive answer");
            return extractive_answer(documents);
        };

        match self.generate(client.as_ref(), query, documents).await {
            Ok(text) => {
                tracing::info!(
                    provider = client.provider_name(),
                    documents = documents.len(),
                    "Generated answer"
                );
                Answer {
                    text,
                    confidence: confidence(documents.len()),
                    sources: documents.iter().map(SourceRef::from).collect(),
                    mode: AnswerMode::Generated,
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = client.provider_name(),
                    "Generation failed, using extractive answer: {}",
                    e
                );
                extractive_answer(documents)
            }
        }
    }

    async fn generate(
        &self,
        client: &dyn LlmClient,
        query: &str,
        documents: &[Document],
    ) -> AppResult<String> {
        let mut variables = HashMap::new();
        variables.insert("context".to_string(), build_context(documents));
        variables.insert("query".to_string(), query.to_string());
        let built = build_prompt(&self.prompt, variables)?;

        let mut request = LlmRequest::new(built.user, &self.settings.model)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        let response = tokio::time::timeout(self.settings.timeout, client.complete(&request))
            .await
            .map_err(|_| {
                AppError::Llm(format!(
                    "Generation timed out after {:.1}s",
                    self.settings.timeout.as_secs_f64()
                ))
            })??;

        let text = response.content.trim();
        if text.is_empty() {
            return Err(AppError::Llm("Provider returned an empty completion".to_string()));
        }

        Ok(text.to_string())
    }
}

/// Render documents into the prompt context block.
pub fn build_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("Title: {}\nContent: {}\n---", doc.title, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answer quoting the opening of the top-ranked document.
pub fn extractive_answer(documents: &[Document]) -> Answer {
    let Some(top) = documents.first() else {
        return Answer::no_knowledge();
    };

    let excerpt: String = top.content.chars().take(EXCERPT_CHARS).collect();
    let ellipsis = if top.content.chars().count() > EXCERPT_CHARS {
        "..."
    } else {
        ""
    };

    Answer {
        text: format!(
            "Based on the information I have about \"{}\": {}{}",
            top.title, excerpt, ellipsis
        ),
        confidence: confidence(documents.len()),
        sources: documents
            .iter()
            .take(EXTRACTIVE_SOURCES)
            .map(SourceRef::from)
            .collect(),
        mode: AnswerMode::Extractive,
    }
}
