//! Prompt loader for YAML prompt definitions.
//!
//! Workspace files under `.assist/prompts/` override the definitions that
//! ship with the binary.

use crate::types::PromptDefinition;
use assist_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Identifier of the grounded-answer prompt used by the answer composer.
pub const ANSWER_PROMPT_ID: &str = "answer.default";

const BUILTIN_ANSWER_PROMPT: &str = include_str!("../prompts/answer.default.yml");

/// Path of a prompt file inside the workspace.
pub fn prompt_path(workspace_path: &Path, prompt_id: &str) -> PathBuf {
    workspace_path
        .join(".assist")
        .join("prompts")
        .join(format!("{}.yml", prompt_id))
}

/// Load a prompt definition by ID from the workspace.
///
/// # Example
/// ```no_run
/// use assist_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "answer.default")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompt_path(workspace_path, prompt_id);

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition = parse_prompt(&contents)
        .map_err(|e| AppError::Prompt(format!("{:?}: {}", prompt_file, e)))?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load a prompt from the workspace, falling back to the built-in
/// definition of the same id.
pub fn load_prompt_or_builtin(
    workspace_path: &Path,
    prompt_id: &str,
) -> AppResult<PromptDefinition> {
    if prompt_path(workspace_path, prompt_id).exists() {
        return load_prompt(workspace_path, prompt_id);
    }

    builtin_prompt(prompt_id)
}

/// Get a prompt that ships with the binary.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<PromptDefinition> {
    match prompt_id {
        ANSWER_PROMPT_ID => parse_prompt(BUILTIN_ANSWER_PROMPT),
        _ => Err(AppError::Prompt(format!(
            "No built-in prompt with id '{}'",
            prompt_id
        ))),
    }
}

fn parse_prompt(contents: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML: {}", e)))?;

    validate_prompt(&definition)?;
    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}
