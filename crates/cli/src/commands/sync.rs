//! Sync command handler.

use super::print_report;
use crate::services::Services;
use assist_core::{config::AppConfig, AppResult};
use clap::Args;

/// Refresh the corpus once and report the result
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing sync command");

        let services = Services::build(config)?;
        let report = services.sync.sync().await;

        print_report(&report, self.json)
    }
}
