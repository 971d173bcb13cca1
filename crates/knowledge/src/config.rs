//! Knowledge pipeline settings.

use assist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for search, sync and answer composition.
///
/// Loaded from `.assist/knowledge.yaml`; every field has a default so a
/// partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeConfig {
    /// Maximum documents handed to the answer stage
    pub search_limit: usize,

    /// Records requested from the content source per sync (1..=100)
    pub page_size: u32,

    pub refresh_interval_hours: u64,

    pub generation_timeout_secs: u64,

    /// Fallback snapshot, relative to the workspace unless absolute
    pub snapshot_path: PathBuf,

    pub max_tokens: u32,

    pub temperature: f32,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            search_limit: 3,
            page_size: 100,
            refresh_interval_hours: 6,
            generation_timeout_secs: 30,
            snapshot_path: PathBuf::from("data").join("fallback_documents.json"),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

impl KnowledgeConfig {
    /// Scheduler period. Never shorter than one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_hours.saturating_mul(3600).max(1))
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Snapshot path resolved against the workspace.
    pub fn resolve_snapshot_path(&self, workspace: &Path) -> PathBuf {
        if self.snapshot_path.is_absolute() {
            self.snapshot_path.clone()
        } else {
            workspace.join(&self.snapshot_path)
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.search_limit == 0 {
            return Err(AppError::Config("searchLimit must be at least 1".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Load knowledge settings.
///
/// Reads `.assist/knowledge.yaml` if it exists, otherwise returns defaults.
pub fn load_config(workspace: &Path) -> AppResult<KnowledgeConfig> {
    let config_path = get_config_path(workspace);

    if !config_path.exists() {
        tracing::debug!("Using default knowledge config (no config file found)");
        return Ok(KnowledgeConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read config at {:?}: {}", config_path, e))
    })?;

    let config: KnowledgeConfig = serde_yaml::from_str(&content).map_err(|e| {
        AppError::Knowledge(format!("Failed to parse config at {:?}: {}", config_path, e))
    })?;

    config.validate()?;

    tracing::debug!("Loaded knowledge config from {:?}", config_path);
    Ok(config)
}

/// Get the path to the knowledge config file.
pub fn get_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".assist").join("knowledge.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(workspace: &Path, yaml: &str) {
        let path = get_config_path(workspace);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, yaml).unwrap();
    }

    #[test]
    fn test_load_default_config() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();

        assert_eq!(config, KnowledgeConfig::default());
        assert_eq!(config.search_limit, 3);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.refresh_interval(), Duration::from_secs(6 * 3600));
        assert_eq!(config.generation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "searchLimit: 5\nrefreshIntervalHours: 1\n");

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.refresh_interval(), Duration::from_secs(3600));
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = KnowledgeConfig {
            refresh_interval_hours: 0,
            ..Default::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "searchLimit: 0\n");
        assert!(matches!(load_config(temp.path()), Err(AppError::Config(_))));

        write_config(temp.path(), "searchLimit: [not, a, number]\n");
        assert!(matches!(load_config(temp.path()), Err(AppError::Knowledge(_))));
    }

    #[test]
    fn test_snapshot_path_resolution() {
        let config = KnowledgeConfig::default();
        let workspace = Path::new("/srv/assist");
        assert_eq!(
            config.resolve_snapshot_path(workspace),
            PathBuf::from("/srv/assist/data/fallback_documents.json")
        );

        let absolute = KnowledgeConfig {
            snapshot_path: PathBuf::from("/var/lib/snapshot.json"),
            ..Default::default()
        };
        assert_eq!(
            absolute.resolve_snapshot_path(workspace),
            PathBuf::from("/var/lib/snapshot.json")
        );
    }
}
