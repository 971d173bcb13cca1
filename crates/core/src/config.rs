//! Configuration management for Campus Assist.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.assist/config.yaml)
//!
//! The configuration is workspace-centric: the fallback snapshot, prompt
//! overrides and knowledge settings all live under the workspace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the answer composer knows how to talk to. `none` disables
/// generation entirely and leaves only extractive answers.
pub const KNOWN_PROVIDERS: [&str; 3] = ["gemini", "ollama", "none"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .assist/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Text-generation provider (e.g., "gemini", "ollama", "none")
    pub provider: String,

    /// Default model identifier
    pub model: String,

    /// API key for the text-generation provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// LLM provider configurations
    pub llm: Option<LlmConfig>,

    /// External content source configuration
    pub source: SourceConfig,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Gemini {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    /// Endpoint override, if the provider config carries one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ProviderConfig::Gemini { endpoint, .. } => endpoint.as_deref(),
            ProviderConfig::Ollama { endpoint, .. } => Some(endpoint.as_str()),
        }
    }
}

/// External content source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub notion: NotionConfig,
}

/// Notion database connection settings. Secrets are never stored in the
/// file, only the names of the environment variables holding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    #[serde(rename = "apiKeyEnv", default = "default_notion_key_env")]
    pub api_key_env: String,

    #[serde(rename = "databaseIdEnv", default = "default_notion_database_env")]
    pub database_id_env: String,

    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_notion_key_env() -> String {
    "NOTION_API_KEY".to_string()
}

fn default_notion_database_env() -> String {
    "NOTION_DATABASE_ID".to_string()
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_notion_key_env(),
            database_id_env: default_notion_database_env(),
            endpoint: None,
        }
    }
}

/// Resolved Notion credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionCredentials {
    pub api_key: String,
    pub database_id: String,
    pub endpoint: Option<String>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    source: Option<SourceConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "gemini".to_string(),
            model: "gemini-pro".to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            source: SourceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `ASSIST_WORKSPACE`: Override workspace path
    /// - `ASSIST_CONFIG`: Path to config file
    /// - `ASSIST_PROVIDER`: Text-generation provider
    /// - `ASSIST_MODEL`: Model identifier
    /// - `ASSIST_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use assist_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// Both take precedence over `ASSIST_WORKSPACE` and `ASSIST_CONFIG`, and
    /// decide which YAML file is merged.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("ASSIST_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if let Some(config_file) =
            config_file.or_else(|| std::env::var("ASSIST_CONFIG").ok().map(PathBuf::from))
        {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.assist_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("ASSIST_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("ASSIST_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("ASSIST_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(source) = config_file.source {
            result.source = source;
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = match provider_config {
                    ProviderConfig::Gemini { model, .. } => model.clone(),
                    ProviderConfig::Ollama { model, .. } => model.clone(),
                };
            }

            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .assist directory.
    pub fn assist_dir(&self) -> PathBuf {
        self.workspace.join(".assist")
    }

    /// Get the configuration of a named provider, if the config file has one.
    pub fn get_provider_config(&self, provider: &str) -> Option<ProviderConfig> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.providers.get(provider).cloned())
    }

    /// Resolve the API key for a provider.
    ///
    /// `ASSIST_API_KEY` wins; otherwise the provider's `apiKeyEnv`, falling
    /// back to `GEMINI_API_KEY` for Gemini.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        let env_var = match self.get_provider_config(provider) {
            Some(ProviderConfig::Gemini { api_key_env, .. }) => Some(api_key_env),
            Some(ProviderConfig::Ollama { .. }) => None,
            None if provider.eq_ignore_ascii_case("gemini") => Some("GEMINI_API_KEY".to_string()),
            None => None,
        }?;

        std::env::var(&env_var).ok().filter(|key| !key.trim().is_empty())
    }

    /// Resolve Notion credentials from the configured environment variables.
    ///
    /// Returns `None` when either the key or the database id is absent, in
    /// which case syncing goes straight to the local snapshot.
    pub fn resolve_notion_credentials(&self) -> Option<NotionCredentials> {
        let notion = &self.source.notion;
        let api_key = std::env::var(&notion.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let database_id = std::env::var(&notion.database_id_env)
            .ok()
            .filter(|v| !v.trim().is_empty())?;

        Some(NotionCredentials {
            api_key,
            database_id,
            endpoint: notion.endpoint.clone(),
        })
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();

        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if let Some(ProviderConfig::Ollama { endpoint, .. }) = self.get_provider_config(&provider)
        {
            if endpoint.trim().is_empty() {
                return Err(AppError::Config(
                    "Ollama endpoint must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
