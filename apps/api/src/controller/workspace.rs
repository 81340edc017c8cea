//! Workspace: One user's committed inputs plus the analysis state machine.
//!
//! Idle → Loading → {Success, Failed}. Editing inputs or uploading clears a
//! failure back to Idle; a successful result survives until the next run.

use serde::{Deserialize, Serialize};

use crate::controller::failure::FailureCategory;
use crate::errors::AppError;
use crate::models::analysis::{is_blank, AnalysisRequest, AnalysisResult};
use crate::models::catalog::{DEFAULT_SUGGESTIONS, MAX_SUGGESTIONS, MIN_SUGGESTIONS};

const ALREADY_RUNNING_MESSAGE: &str = "Đang phân tích giáo án, vui lòng chờ.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisPhase {
    Idle,
    Loading,
    Success {
        result: AnalysisResult,
    },
    Failed {
        category: FailureCategory,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadTarget {
    Lesson,
    Framework,
}

/// Partial edit of the inputs; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputUpdate {
    pub lesson_content: Option<String>,
    pub framework_content: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub num_suggestions: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub lesson_content: String,
    pub framework_content: String,
    pub subject: String,
    pub grade: String,
    pub num_suggestions: u8,
    pub phase: AnalysisPhase,
    /// Inline validation or upload message.
    pub notice: Option<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            lesson_content: String::new(),
            framework_content: String::new(),
            subject: String::new(),
            grade: String::new(),
            num_suggestions: DEFAULT_SUGGESTIONS,
            phase: AnalysisPhase::Idle,
            notice: None,
        }
    }
}

impl Workspace {
    pub fn is_loading(&self) -> bool {
        self.phase == AnalysisPhase::Loading
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            AnalysisPhase::Success { result } => Some(result),
            _ => None,
        }
    }

    /// Commits an edit. An out-of-range count rejects the whole edit.
    pub fn apply_inputs(&mut self, update: InputUpdate) -> Result<(), AppError> {
        if let Some(n) = update.num_suggestions {
            if !(MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&n) {
                return Err(AppError::Validation(format!(
                    "numSuggestions must be between {MIN_SUGGESTIONS} and {MAX_SUGGESTIONS}"
                )));
            }
            self.num_suggestions = n;
        }
        if let Some(text) = update.lesson_content {
            self.lesson_content = text;
        }
        if let Some(text) = update.framework_content {
            self.framework_content = text;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(grade) = update.grade {
            self.grade = grade;
        }
        self.settle_failure();
        Ok(())
    }

    pub fn apply_upload(&mut self, target: UploadTarget, text: String) {
        match target {
            UploadTarget::Lesson => self.lesson_content = text,
            UploadTarget::Framework => self.framework_content = text,
        }
        self.settle_failure();
    }

    /// A failed upload only surfaces a notice; inputs and phase are kept.
    pub fn reject_upload(&mut self, message: String) {
        self.notice = Some(message);
    }

    /// Guards the trigger and enters Loading, returning the request to run.
    ///
    /// Missing inputs leave the phase untouched and set the notice. Entering
    /// Loading discards any previous result.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, AppError> {
        if self.is_loading() {
            return Err(AppError::Conflict(ALREADY_RUNNING_MESSAGE.to_string()));
        }

        let request = AnalysisRequest {
            lesson_content: self.lesson_content.clone(),
            subject: self.subject.clone(),
            grade: self.grade.clone(),
            num_suggestions: self.num_suggestions,
            framework_content: (!is_blank(&self.framework_content))
                .then(|| self.framework_content.clone()),
        };

        if let Err(e) = request.validate() {
            if let AppError::Validation(msg) = &e {
                self.notice = Some(msg.clone());
            }
            return Err(e);
        }

        self.phase = AnalysisPhase::Loading;
        self.notice = None;
        Ok(request)
    }

    pub fn complete(&mut self, result: AnalysisResult) {
        self.phase = AnalysisPhase::Success { result };
    }

    /// Records a failed run from the raw error text.
    pub fn fail(&mut self, raw_message: &str) -> FailureCategory {
        let category = FailureCategory::classify(raw_message);
        self.phase = AnalysisPhase::Failed {
            category,
            message: category.user_message().to_string(),
        };
        category
    }

    fn settle_failure(&mut self) {
        if matches!(self.phase, AnalysisPhase::Failed { .. }) {
            self.phase = AnalysisPhase::Idle;
        }
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::failure::MALFORMED_DATA_MESSAGE;
    use crate::models::analysis::MISSING_INPUT_MESSAGE;

    fn ready() -> Workspace {
        let mut ws = Workspace::default();
        ws.apply_inputs(InputUpdate {
            lesson_content: Some("Mục tiêu: ...".to_string()),
            subject: Some("Toán".to_string()),
            grade: Some("Lớp 5".to_string()),
            ..Default::default()
        })
        .unwrap();
        ws
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            digital_competencies: vec![],
            overall_summary: "ok".to_string(),
            full_integrated_content: "x".to_string(),
        }
    }

    #[test]
    fn test_default_workspace_is_idle_with_three_suggestions() {
        let ws = Workspace::default();
        assert_eq!(ws.phase, AnalysisPhase::Idle);
        assert_eq!(ws.num_suggestions, 3);
    }

    #[test]
    fn test_begin_without_inputs_stays_idle_with_notice() {
        let mut ws = Workspace::default();
        let err = ws.begin_analysis().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(ws.phase, AnalysisPhase::Idle);
        assert_eq!(ws.notice.as_deref(), Some(MISSING_INPUT_MESSAGE));
    }

    #[test]
    fn test_begin_builds_request_and_enters_loading() {
        let mut ws = ready();
        let request = ws.begin_analysis().unwrap();
        assert_eq!(request.subject, "Toán");
        assert_eq!(request.num_suggestions, 3);
        assert_eq!(request.framework_content, None);
        assert!(ws.is_loading());
    }

    #[test]
    fn test_second_trigger_while_loading_is_rejected() {
        let mut ws = ready();
        ws.begin_analysis().unwrap();
        assert!(matches!(ws.begin_analysis(), Err(AppError::Conflict(_))));
        assert!(ws.is_loading());
    }

    #[test]
    fn test_success_then_rerun_clears_previous_result() {
        let mut ws = ready();
        ws.begin_analysis().unwrap();
        ws.complete(result());
        assert!(ws.result().is_some());

        ws.begin_analysis().unwrap();
        assert!(ws.result().is_none());
        ws.fail("HTTP error: connection reset");
        assert!(ws.result().is_none());
    }

    #[test]
    fn test_json_failure_uses_malformed_message() {
        let mut ws = ready();
        ws.begin_analysis().unwrap();
        let category = ws.fail("JSON parse error: EOF while parsing");
        assert_eq!(category, FailureCategory::MalformedData);
        match &ws.phase {
            AnalysisPhase::Failed { message, .. } => assert_eq!(message, MALFORMED_DATA_MESSAGE),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_editing_after_failure_returns_to_idle() {
        let mut ws = ready();
        ws.begin_analysis().unwrap();
        ws.fail("boom");
        ws.apply_inputs(InputUpdate {
            num_suggestions: Some(5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ws.phase, AnalysisPhase::Idle);
        assert_eq!(ws.num_suggestions, 5);
    }

    #[test]
    fn test_editing_after_success_keeps_result() {
        let mut ws = ready();
        ws.begin_analysis().unwrap();
        ws.complete(result());
        ws.apply_inputs(InputUpdate {
            grade: Some("Lớp 4".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(ws.result().is_some());
    }

    #[test]
    fn test_out_of_range_count_rejects_whole_edit() {
        let mut ws = ready();
        let err = ws.apply_inputs(InputUpdate {
            subject: Some("Tin học".to_string()),
            num_suggestions: Some(11),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(ws.subject, "Toán");
        assert_eq!(ws.num_suggestions, 3);
    }

    #[test]
    fn test_upload_sets_target_field() {
        let mut ws = Workspace::default();
        ws.apply_upload(UploadTarget::Framework, "Khung DigComp".to_string());
        ws.apply_upload(UploadTarget::Lesson, "Bài 1".to_string());
        assert_eq!(ws.framework_content, "Khung DigComp");
        assert_eq!(ws.lesson_content, "Bài 1");
    }

    #[test]
    fn test_framework_is_forwarded_when_present() {
        let mut ws = ready();
        ws.apply_upload(UploadTarget::Framework, "Khung DigComp".to_string());
        let request = ws.begin_analysis().unwrap();
        assert_eq!(request.framework_content.as_deref(), Some("Khung DigComp"));
    }

    #[test]
    fn test_rejected_upload_keeps_inputs() {
        let mut ws = ready();
        ws.reject_upload("Lỗi khi đọc file: x.pdf".to_string());
        assert_eq!(ws.lesson_content, "Mục tiêu: ...");
        assert!(ws.notice.is_some());
    }
}
