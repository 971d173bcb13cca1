//! Retrieval and answering over a synced document corpus.
//!
//! - [`store`]: in-memory documents plus a keyword inverted index
//! - [`search`]: match-count ranking with a no-match fallback
//! - [`sync`]: refresh from a content source, or from the local snapshot
//! - [`rag`]: answer composition with generation and an extractive fallback
//! - [`orchestrator`]: search, then compose

pub mod config;
pub mod orchestrator;
pub mod rag;
pub mod scheduler;
pub mod search;
pub mod store;
pub mod sync;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::{load_config, KnowledgeConfig};
pub use orchestrator::QueryOrchestrator;
pub use rag::{Answer, AnswerComposer, AnswerMode, GenerationSettings, SourceRef};
pub use scheduler::{spawn_sync_scheduler, SyncScheduler};
pub use search::{RankedDocument, SearchEngine, DEFAULT_SEARCH_LIMIT};
pub use store::{Corpus, CorpusStore};
pub use sync::{ContentSource, NotionSource, SyncManager, SyncOrigin, SyncReport};
pub use types::Document;
