//! Construction of the long-lived pipeline components.

use assist_core::{config::AppConfig, AppResult};
use assist_knowledge::{
    load_config, AnswerComposer, ContentSource, CorpusStore, GenerationSettings, KnowledgeConfig,
    NotionSource, QueryOrchestrator, SearchEngine, SyncManager,
};
use assist_llm::{create_client, LlmClient};
use assist_prompt::{load_prompt_or_builtin, ANSWER_PROMPT_ID};
use std::sync::Arc;

/// Everything a command needs, built once per process.
pub struct Services {
    pub store: Arc<CorpusStore>,
    pub sync: Arc<SyncManager>,
    pub orchestrator: QueryOrchestrator,
    pub settings: KnowledgeConfig,
}

impl Services {
    pub fn build(config: &AppConfig) -> AppResult<Self> {
        let settings = load_config(&config.workspace)?;
        let store = Arc::new(CorpusStore::new());

        let source: Option<Arc<dyn ContentSource>> = match config.resolve_notion_credentials() {
            Some(credentials) => Some(Arc::new(NotionSource::from_credentials(&credentials))),
            None => {
                tracing::warn!("Notion API key or database ID not configured, syncs will use the fallback snapshot");
                None
            }
        };

        let sync = Arc::new(SyncManager::new(
            Arc::clone(&store),
            source,
            settings.resolve_snapshot_path(&config.workspace),
            settings.page_size,
        ));

        let prompt = load_prompt_or_builtin(&config.workspace, ANSWER_PROMPT_ID)?;
        let generation = GenerationSettings {
            model: config.model.clone(),
            timeout: settings.generation_timeout(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        };
        let composer = AnswerComposer::new(llm_client(config), prompt, generation);

        let orchestrator = QueryOrchestrator::new(
            SearchEngine::new(Arc::clone(&store)),
            composer,
            settings.search_limit,
        );

        Ok(Self {
            store,
            sync,
            orchestrator,
            settings,
        })
    }
}

/// Resolve the configured provider. A provider that cannot be set up
/// disables generation rather than failing the command.
fn llm_client(config: &AppConfig) -> Option<Arc<dyn LlmClient>> {
    let provider_config = config.get_provider_config(&config.provider);
    let endpoint = provider_config.as_ref().and_then(|pc| pc.endpoint());
    let api_key = config.resolve_api_key(&config.provider);

    match create_client(&config.provider, endpoint, api_key.as_deref()) {
        Ok(Some(client)) => {
            tracing::debug!("Text generation via {}", client.provider_name());
            Some(client)
        }
        Ok(None) => {
            tracing::info!("Text generation disabled, answers will be extractive");
            None
        }
        Err(e) => {
            tracing::warn!("Text generation unavailable ({}), answers will be extractive", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(workspace: &std::path::Path, provider: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.workspace = workspace.to_path_buf();
        config.provider = provider.to_string();
        config
    }

    #[test]
    fn test_disabled_provider_has_no_client() {
        let temp = TempDir::new().unwrap();
        assert!(llm_client(&config_for(temp.path(), "none")).is_none());
    }

    #[test]
    fn test_ollama_provider_builds_client() {
        let temp = TempDir::new().unwrap();
        let client = llm_client(&config_for(temp.path(), "ollama")).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[tokio::test]
    async fn test_services_answer_from_snapshot() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("data")).unwrap();
        std::fs::write(
            temp.path().join("data").join("fallback_documents.json"),
            r#"[{"id": "1", "title": "Admissions", "content": "Apply before March 1st for Fall admission.", "url": "https://college.edu/admissions"}]"#,
        )
        .unwrap();

        let mut config = config_for(temp.path(), "none");
        // Point the source at variables that are never set
        config.source.notion.api_key_env = "ASSIST_TEST_UNSET_NOTION_KEY".to_string();
        config.source.notion.database_id_env = "ASSIST_TEST_UNSET_NOTION_DB".to_string();

        let services = Services::build(&config).unwrap();
        let report = services.sync.sync().await;
        assert_eq!(report.documents, 1);
        assert_eq!(services.store.count(), 1);

        let answer = services.orchestrator.handle("admission deadline").await;
        assert!(answer
            .text
            .starts_with("Based on the information I have about \"Admissions\":"));
        assert_eq!(services.settings.search_limit, 3);
    }
}
