//! Prompt system for Campus Assist.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions (built-in, overridable per workspace)
//! - Handlebars template rendering

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{builtin_prompt, load_prompt, load_prompt_or_builtin, ANSWER_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptBehavior, PromptDefinition, PromptOutputSpec};
