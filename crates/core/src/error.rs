//! Error types for Campus Assist.
//!
//! A single error enum covers configuration, I/O, text generation, the
//! knowledge pipeline, the external content source, prompts and caller
//! input validation.

use thiserror::Error;

/// Unified error type for Campus Assist.
///
/// Fallible functions return `Result<T, AppError>`. The query and sync
/// paths recover from most of these internally; only configuration and
/// validation errors are expected to reach the user.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text-generation provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Corpus, search and answering errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// External content source errors (network, auth, rate limits)
    #[error("Content source error: {0}")]
    Source(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Malformed caller input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
