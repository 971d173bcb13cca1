//! Keyword search over the corpus.
//!
//! Scoring is a plain match count: every query token found in the index adds
//! one point to each document in its posting set. Equal scores keep
//! ingestion order.

use crate::store::{Corpus, CorpusStore};
use crate::tokenizer::tokenize;
use crate::types::Document;
use std::collections::HashMap;
use std::sync::Arc;

/// Number of documents returned when the caller does not ask otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Number of documents returned when nothing matches a non-empty corpus.
pub const FALLBACK_RESULTS: usize = 2;

/// A document together with its match score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    pub document: Document,
    pub score: u32,
}

/// Read-only search over a [`CorpusStore`].
#[derive(Debug, Clone)]
pub struct SearchEngine {
    store: Arc<CorpusStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<CorpusStore>) -> Self {
        Self { store }
    }

    /// Top `limit` documents for `query`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Document> {
        self.rank(query, limit)
            .into_iter()
            .map(|ranked| ranked.document)
            .collect()
    }

    /// Top `limit` documents for `query`, with scores.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<RankedDocument> {
        let corpus = self.store.snapshot();
        let ranked = rank_corpus(&corpus, query, limit);

        tracing::debug!(
            query = %query,
            results = ranked.len(),
            top_score = ranked.first().map(|r| r.score).unwrap_or(0),
            "Searched corpus"
        );

        ranked
    }
}

/// Score and rank documents of a single corpus snapshot.
///
/// When no document matches but the corpus is not empty, the first
/// [`FALLBACK_RESULTS`] documents are returned with a score of zero so the
/// answer stage always has something to work with.
pub fn rank_corpus(corpus: &Corpus, query: &str, limit: usize) -> Vec<RankedDocument> {
    if corpus.is_empty() {
        return Vec::new();
    }

    let mut scores: HashMap<usize, u32> = HashMap::new();
    for token in tokenize(query) {
        if let Some(postings) = corpus.postings(&token) {
            for &pos in postings {
                *scores.entry(pos).or_insert(0) += 1;
            }
        }
    }

    if scores.is_empty() {
        return corpus
            .documents()
            .iter()
            .take(FALLBACK_RESULTS)
            .map(|document| RankedDocument {
                document: document.clone(),
                score: 0,
            })
            .collect();
    }

    let mut scored: Vec<(usize, u32)> = scores.into_iter().collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(limit)
        .filter_map(|(pos, score)| {
            corpus.document_at(pos).map(|document| RankedDocument {
                document: document.clone(),
                score,
            })
        })
        .collect()
}
