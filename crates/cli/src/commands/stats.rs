//! Stats command handler.
//!
//! Loads the corpus and shows what it holds.

use crate::services::Services;
use assist_core::{config::AppConfig, AppResult};
use clap::Args;

/// Show corpus statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let services = Services::build(config)?;
        let report = services.sync.sync().await;
        let corpus = services.store.snapshot();

        if self.json {
            let output = serde_json::json!({
                "documents": services.store.count(),
                "indexedTokens": corpus.vocabulary_size(),
                "origin": report.origin,
                "refreshIntervalHours": services.settings.refresh_interval_hours,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Documents: {}", services.store.count());
        println!("Indexed tokens: {}", corpus.vocabulary_size());
        println!("Loaded from: {}", report.origin.as_str());
        for doc in corpus.documents() {
            println!("  - {} (updated {})", doc.title, doc.last_modified.format("%Y-%m-%d"));
        }

        Ok(())
    }
}
