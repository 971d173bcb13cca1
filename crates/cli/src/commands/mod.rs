//! Command handlers for the Campus Assist CLI.

pub mod ask;
pub mod chat;
pub mod stats;
pub mod sync;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use stats::StatsCommand;
pub use sync::SyncCommand;

use assist_core::{AppError, AppResult};
use assist_knowledge::{Answer, SyncReport};

/// Longest question accepted, in characters.
pub const MAX_QUERY_CHARS: usize = 1000;

/// Trim a question and check its length.
pub fn validate_query(raw: &str) -> AppResult<&str> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }

    let chars = query.chars().count();
    if chars > MAX_QUERY_CHARS {
        return Err(AppError::Validation(format!(
            "Question is too long ({} characters, maximum {})",
            chars, MAX_QUERY_CHARS
        )));
    }

    Ok(query)
}

pub(crate) fn print_answer(answer: &Answer, json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(answer)?);
        return Ok(());
    }

    println!("{}", answer.text);

    if !answer.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &answer.sources {
            if source.url.is_empty() {
                println!("  - {}", source.title);
            } else {
                println!("  - {} ({})", source.title, source.url);
            }
        }
    }
    println!("Confidence: {:.0}%", answer.confidence * 100.0);

    Ok(())
}

pub(crate) fn print_report(report: &SyncReport, json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Synced {} documents from {} in {:.2}s",
        report.documents,
        report.origin.as_str(),
        report.duration_secs
    );
    if report.skipped > 0 {
        println!("Skipped {} records", report.skipped);
    }

    Ok(())
}
