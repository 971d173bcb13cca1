//! Ask command handler.
//!
//! Syncs the corpus once, then answers a single question.

use super::{print_answer, validate_query};
use crate::services::Services;
use assist_core::{config::AppConfig, AppResult};
use clap::Args;

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let query = validate_query(&self.question)?;
        let services = Services::build(config)?;

        let report = services.sync.sync().await;
        tracing::debug!(
            origin = report.origin.as_str(),
            documents = report.documents,
            "Corpus ready"
        );

        let answer = services.orchestrator.handle(query).await;
        tracing::debug!(mode = ?answer.mode, confidence = answer.confidence, "Answered");

        print_answer(&answer, self.json)
    }
}
