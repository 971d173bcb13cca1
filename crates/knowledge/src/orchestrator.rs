//! Question handling: search, then compose.

use crate::rag::{Answer, AnswerComposer};
use crate::search::SearchEngine;

/// Entry point for answering a question against the current corpus.
pub struct QueryOrchestrator {
    search: SearchEngine,
    composer: AnswerComposer,
    limit: usize,
}

impl QueryOrchestrator {
    pub fn new(search: SearchEngine, composer: AnswerComposer, limit: usize) -> Self {
        Self {
            search,
            composer,
            limit,
        }
    }

    /// Answer `query`. Never fails; an empty result yields the no-knowledge
    /// answer without calling the composer.
    pub async fn handle(&self, query: &str) -> Answer {
        let documents = self.search.search(query, self.limit);

        if documents.is_empty() {
            tracing::info!("No documents found for query");
            return Answer::no_knowledge();
        }

        tracing::debug!(
            documents = documents.len(),
            top = %documents[0].title,
            "Composing answer"
        );

        self.composer.compose(query, &documents).await
    }
}
