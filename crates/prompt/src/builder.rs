//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use assist_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// The definition's behavior settings are available to the template as
/// `tone` and `style` unless the caller supplies them explicitly.
///
/// # Example
/// ```no_run
/// use assist_prompt::{build_prompt, builtin_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = builtin_prompt("answer.default")?;
/// let mut vars = HashMap::new();
/// vars.insert("query".to_string(), "When is the deadline?".to_string());
/// vars.insert("context".to_string(), "Title: Admissions".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("{}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    mut variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    variables
        .entry("tone".to_string())
        .or_insert_with(|| definition.behavior.tone.clone());
    variables
        .entry("style".to_string())
        .or_insert_with(|| definition.behavior.style.clone());

    let user = render_template(&definition.template, &variables)?;
    let system = definition
        .system
        .as_deref()
        .map(|template| render_template(template, &variables))
        .transpose()?;

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Document text must reach the model verbatim
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PromptBehavior, PromptOutputSpec};

    fn create_test_definition(system: Option<&str>) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            behavior: PromptBehavior {
                tone: "professional".to_string(),
                style: "concise".to_string(),
            },
            system: system.map(str::to_string),
            template: "Question: {{query}}\nContext: {{context}}".to_string(),
            output: PromptOutputSpec {
                format: "markdown".to_string(),
            },
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{query}}", &vars).unwrap();
        assert_eq!(result, "Question: Hello, world!");
    }

    #[test]
    fn test_build_prompt_does_not_escape_document_text() {
        let def = create_test_definition(None);
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), "Fees & <deadlines>?".to_string());
        vars.insert("context".to_string(), "Title: \"Fees\"".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(
            built.user,
            "Question: Fees & <deadlines>?\nContext: Title: \"Fees\""
        );
        assert!(built.system.is_none());
        assert_eq!(built.metadata.source_prompt_id, "test.prompt");
    }

    #[test]
    fn test_behavior_is_injected() {
        let def = create_test_definition(Some("Be {{style}} and {{tone}}."));
        let built = build_prompt(&def, HashMap::new()).unwrap();

        assert_eq!(built.system.as_deref(), Some("Be concise and professional."));
        assert_eq!(
            built.metadata.resolved_variables.get("tone").map(String::as_str),
            Some("professional")
        );
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        // Handlebars renders missing variables as empty string
        assert_eq!(render_template("Question: {{missing}}", &vars).unwrap(), "Question: ");
    }
}
