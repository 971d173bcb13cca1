//! Chat command handler.
//!
//! Long-running session: the corpus is synced at start and then on a fixed
//! period in the background while questions are read from stdin.

use super::{print_answer, print_report, validate_query};
use crate::services::Services;
use assist_core::{config::AppConfig, AppResult};
use assist_knowledge::spawn_sync_scheduler;
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive session with periodic refresh
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Override the refresh period, in hours
    #[arg(long)]
    pub refresh_hours: Option<u64>,
}

/// A line typed at the prompt.
#[derive(Debug, PartialEq)]
enum ChatInput<'a> {
    Question(&'a str),
    Sync,
    Stats,
    Quit,
    Blank,
}

fn parse_input(line: &str) -> ChatInput<'_> {
    match line.trim() {
        "" => ChatInput::Blank,
        "/sync" => ChatInput::Sync,
        "/stats" => ChatInput::Stats,
        "/quit" | "/exit" => ChatInput::Quit,
        question => ChatInput::Question(question),
    }
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let mut services = Services::build(config)?;
        if let Some(hours) = self.refresh_hours {
            services.settings.refresh_interval_hours = hours;
        }

        let report = services.sync.sync().await;
        print_report(&report, false)?;

        let scheduler = spawn_sync_scheduler(
            std::sync::Arc::clone(&services.sync),
            services.settings.refresh_interval(),
        );

        println!("Ask a question, or type /sync, /stats or /quit.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_input(&line) {
                ChatInput::Blank => continue,
                ChatInput::Quit => break,
                ChatInput::Sync => {
                    let report = services.sync.sync().await;
                    print_report(&report, false)?;
                }
                ChatInput::Stats => {
                    println!("Documents: {}", services.store.count());
                }
                ChatInput::Question(question) => match validate_query(question) {
                    Ok(query) => {
                        let answer = services.orchestrator.handle(query).await;
                        print_answer(&answer, false)?;
                    }
                    Err(e) => eprintln!("{}", e),
                },
            }
            println!();
        }

        scheduler.shutdown();
        Ok(())
    }
}
