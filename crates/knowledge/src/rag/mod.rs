//! Answer composition over retrieved documents.

pub mod compose;
pub mod types;

pub use compose::{build_context, extractive_answer, AnswerComposer, GenerationSettings};
pub use types::{confidence, Answer, AnswerMode, SourceRef, NO_KNOWLEDGE_ANSWER};
