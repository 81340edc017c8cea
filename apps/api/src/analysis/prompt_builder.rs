//! Prompt Builder: Turns the committed inputs into the model payload.
//!
//! Pure transformation: the same request always yields the same payload.

use serde::Serialize;

use crate::analysis::prompts::{
    DEFAULT_FRAMEWORK, FRAMEWORK_TEMPLATE, LESSON_TEMPLATE, SYSTEM_INSTRUCTION_TEMPLATE,
    TASK_TEMPLATE,
};
use crate::errors::AppError;
use crate::models::analysis::{is_blank, AnalysisRequest};

/// Everything the inference client sends: one system instruction plus the
/// ordered user parts (task, framework, lesson).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPayload {
    pub system_instruction: String,
    pub parts: Vec<String>,
}

/// Builds the payload for one analysis run.
///
/// Fails with `AppError::Validation` when lesson, subject or grade is blank or
/// the suggestion count is outside 1..=10.
pub fn build(request: &AnalysisRequest) -> Result<PromptPayload, AppError> {
    request.validate()?;

    let num_suggestions = request.num_suggestions.to_string();
    let audience = [
        ("num_suggestions", num_suggestions.as_str()),
        ("subject", request.subject.as_str()),
        ("grade", request.grade.as_str()),
    ];

    let system_instruction = fill(SYSTEM_INSTRUCTION_TEMPLATE, &audience);
    let task = fill(TASK_TEMPLATE, &audience);

    let framework = match request.framework_content.as_deref() {
        Some(text) if !is_blank(text) => fill(FRAMEWORK_TEMPLATE, &[("framework", text)]),
        _ => DEFAULT_FRAMEWORK.to_string(),
    };

    let lesson = fill(LESSON_TEMPLATE, &[("lesson", request.lesson_content.as_str())]);

    Ok(PromptPayload {
        system_instruction,
        parts: vec![task, framework, lesson],
    })
}

/// Substitutes `{name}` placeholders in one pass over the template.
/// Inserted values are never scanned again, and unknown placeholders are
/// left as they are.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
