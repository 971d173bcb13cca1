//! Answer types.

use crate::types::Document;
use serde::{Deserialize, Serialize};

/// Reply used when the corpus has nothing relevant to say.
pub const NO_KNOWLEDGE_ANSWER: &str = "I'm sorry, I don't have information about that topic in my knowledge base. Please try asking about courses, admissions, campus facilities, or academic programs.";

/// A document an answer draws on, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

impl From<&Document> for SourceRef {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
        }
    }
}

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// Written by the text-generation provider
    Generated,
    /// Excerpt of the top document
    Extractive,
    NoKnowledge,
}

/// Response to a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,

    /// In `[0, 1]`, derived from how many documents were retrieved
    pub confidence: f32,

    pub sources: Vec<SourceRef>,

    #[serde(skip_serializing)]
    pub mode: AnswerMode,
}

impl Answer {
    pub fn no_knowledge() -> Self {
        Self {
            text: NO_KNOWLEDGE_ANSWER.to_string(),
            confidence: 0.0,
            sources: Vec::new(),
            mode: AnswerMode::NoKnowledge,
        }
    }
}

/// Confidence for an answer built from `documents` retrieved documents.
pub fn confidence(documents: usize) -> f32 {
    match documents {
        0 => 0.0,
        1 => 0.5,
        2 => 0.7,
        _ => 0.9,
    }
}
