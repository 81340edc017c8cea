use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::catalog::{MAX_SUGGESTIONS, MIN_SUGGESTIONS};

/// Surfaced inline when the trigger fires without the required inputs.
pub const MISSING_INPUT_MESSAGE: &str =
    "Vui lòng cung cấp đầy đủ: Môn học, Khối lớp và Nội dung giáo án.";

/// One analysis run's inputs, built fresh from the committed workspace state
/// at the moment the trigger fires. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub lesson_content: String,
    pub subject: String,
    pub grade: String,
    pub num_suggestions: u8,
    pub framework_content: Option<String>,
}

impl AnalysisRequest {
    /// Checks the preconditions for issuing an inference call.
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.lesson_content) || is_blank(&self.subject) || is_blank(&self.grade) {
            return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }
        if !(MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&self.num_suggestions) {
            return Err(AppError::Validation(format!(
                "numSuggestions must be between {MIN_SUGGESTIONS} and {MAX_SUGGESTIONS}, got {}",
                self.num_suggestions
            )));
        }
        Ok(())
    }
}

/// A single integration suggestion. All fields are opaque model text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalCompetencyItem {
    pub name: String,
    pub description: String,
    pub insertion_point: String,
    pub evaluation_signs: String,
    pub original_text_proposal: String,
}

/// Structured output of one successful inference call.
///
/// `full_integrated_content` is the whole lesson plan with inserted passages
/// wrapped in highlight markers (`<span style="color: blue;">…</span>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub digital_competencies: Vec<DigitalCompetencyItem>,
    pub overall_summary: String,
    pub full_integrated_content: String,
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
