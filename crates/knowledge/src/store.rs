//! In-memory corpus with a keyword inverted index.
//!
//! A [`Corpus`] is built once and never mutated. [`CorpusStore`] holds the
//! current corpus behind a single `RwLock<Arc<_>>`; replacing it swaps the
//! pointer, so readers see either the old corpus or the new one in full.

use crate::tokenizer::tokenize;
use crate::types::Document;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Documents plus the index derived from them.
///
/// Postings hold ingestion positions rather than IDs, so iterating a
/// posting set yields documents in the order they were ingested.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    positions: HashMap<String, usize>,
    index: HashMap<String, BTreeSet<usize>>,
}

impl Corpus {
    /// Build a corpus from a batch of documents.
    ///
    /// A repeated ID replaces the earlier document in its original position.
    pub fn build(documents: Vec<Document>) -> Self {
        let mut corpus = Corpus::default();

        for doc in documents {
            match corpus.positions.get(&doc.id) {
                Some(&pos) => {
                    tracing::warn!(id = %doc.id, "Duplicate document id in batch, keeping the later one");
                    corpus.documents[pos] = doc;
                }
                None => {
                    corpus.positions.insert(doc.id.clone(), corpus.documents.len());
                    corpus.documents.push(doc);
                }
            }
        }

        for (pos, doc) in corpus.documents.iter().enumerate() {
            for token in tokenize(&doc.indexable_text()) {
                corpus.index.entry(token).or_default().insert(pos);
            }
        }

        corpus
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents in ingestion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.positions.get(id).map(|&pos| &self.documents[pos])
    }

    /// IDs of the documents containing `token`, in ingestion order.
    pub fn lookup(&self, token: &str) -> Vec<&str> {
        self.postings(token)
            .map(|set| set.iter().map(|&pos| self.documents[pos].id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Posting set for an already-normalized token.
    pub(crate) fn postings(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.index.get(token)
    }

    pub(crate) fn document_at(&self, pos: usize) -> Option<&Document> {
        self.documents.get(pos)
    }

    /// Number of distinct tokens in the index.
    pub fn vocabulary_size(&self) -> usize {
        self.index.len()
    }

    /// Iterate over the index as `(token, document ids)`.
    pub fn index_entries(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.index.iter().map(|(token, set)| {
            let ids = set
                .iter()
                .map(|&pos| self.documents[pos].id.as_str())
                .collect();
            (token.as_str(), ids)
        })
    }
}

/// Shared holder of the current corpus.
///
/// The sync manager is the only writer; searches take a snapshot per request
/// and never hold the lock while working.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The corpus as of now. Later replacements do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Corpus> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    /// Replace every document and the index. Returns the new document count.
    pub fn replace_all(&self, documents: Vec<Document>) -> usize {
        // Build outside the lock; the write only swaps the pointer
        let corpus = Arc::new(Corpus::build(documents));
        let count = corpus.len();

        tracing::debug!(
            documents = count,
            tokens = corpus.vocabulary_size(),
            "Built corpus index"
        );

        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = corpus;

        count
    }

    pub fn count(&self) -> usize {
        self.snapshot().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            url: format!("https://example.edu/{}", id),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = CorpusStore::new();
        assert_eq!(store.count(), 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_replace_all_indexes_title_and_content() {
        let store = CorpusStore::new();
        let count = store.replace_all(vec![
            doc("1", "Admissions", "Apply before March 1st for Fall admission."),
            doc("2", "Library", "The library opens at 8am. Apply for a card online."),
        ]);

        assert_eq!(count, 2);
        assert_eq!(store.count(), 2);

        let corpus = store.snapshot();
        assert_eq!(corpus.lookup("admissions"), vec!["1"]);
        assert_eq!(corpus.lookup("apply"), vec!["1", "2"]);
        assert_eq!(corpus.lookup("library"), vec!["2"]);
        assert!(corpus.lookup("for").contains(&"1"));
        // Short and unseen tokens are not indexed
        assert!(corpus.lookup("at").is_empty());
        assert!(corpus.lookup("dormitory").is_empty());
        assert_eq!(corpus.get("2").map(|d| d.title.as_str()), Some("Library"));
        assert!(corpus.get("3").is_none());
    }

    #[test]
    fn test_index_only_references_present_documents() {
        let store = CorpusStore::new();
        store.replace_all(vec![
            doc("a", "Housing", "Dorm applications close in May."),
            doc("b", "Dining", "Meal plans are required for dorm residents."),
        ]);

        let corpus = store.snapshot();
        assert!(corpus.vocabulary_size() > 0);
        for (token, ids) in corpus.index_entries() {
            assert!(!ids.is_empty(), "token {} has an empty posting set", token);
            for id in ids {
                assert!(corpus.get(id).is_some(), "token {} references missing {}", token, id);
            }
        }
    }

    #[test]
    fn test_replace_leaves_no_residue() {
        let store = CorpusStore::new();
        store.replace_all(vec![
            doc("old-1", "Parking", "Permits are sold at the kiosk."),
            doc("old-2", "Athletics", "Gym hours vary by season."),
        ]);
        store.replace_all(vec![doc("new-1", "Registrar", "Transcripts take three days.")]);

        let corpus = store.snapshot();
        assert_eq!(store.count(), 1);
        assert!(corpus.get("old-1").is_none());
        assert!(corpus.lookup("permits").is_empty());
        assert!(corpus.lookup("gym").is_empty());
        assert_eq!(corpus.lookup("transcripts"), vec!["new-1"]);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_replace() {
        let store = CorpusStore::new();
        store.replace_all(vec![doc("1", "Admissions", "Apply early.")]);

        let before = store.snapshot();
        store.replace_all(Vec::new());

        assert_eq!(before.len(), 1);
        assert_eq!(before.lookup("apply"), vec!["1"]);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_duplicate_ids_keep_later_document() {
        let store = CorpusStore::new();
        let count = store.replace_all(vec![
            doc("1", "Fees", "Tuition is due in August."),
            doc("2", "Clubs", "Join a club during orientation."),
            doc("1", "Fees", "Tuition is due in September."),
        ]);

        let corpus = store.snapshot();
        assert_eq!(count, 2);
        assert_eq!(corpus.documents()[0].content, "Tuition is due in September.");
        assert!(corpus.lookup("august").is_empty());
        assert_eq!(corpus.lookup("september"), vec!["1"]);
    }

    #[test]
    fn test_concurrent_readers_see_whole_corpora() {
        let store = Arc::new(CorpusStore::new());
        let small: Vec<Document> = (0..3).map(|i| doc(&format!("s{}", i), "Small", "alpha")).collect();
        let large: Vec<Document> = (0..50).map(|i| doc(&format!("l{}", i), "Large", "alpha")).collect();
        store.replace_all(small.clone());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let corpus = store.snapshot();
                        let n = corpus.len();
                        assert!(n == 3 || n == 50, "observed a partial corpus of {}", n);
                        assert_eq!(corpus.lookup("alpha").len(), n);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            if i % 2 == 0 {
                store.replace_all(large.clone());
            } else {
                store.replace_all(small.clone());
            }
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
