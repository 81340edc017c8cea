//! Maps raw inference error text to one of four user-facing messages.

use serde::Serialize;

pub const MALFORMED_DATA_MESSAGE: &str = "Lỗi định dạng dữ liệu (Giáo án quá dài hoặc phức tạp). \
    Vui lòng thử lại với số lượng tích hợp ít hơn hoặc kiểm tra API Key.";
pub const KEY_NOT_FOUND_MESSAGE: &str =
    "Không tìm thấy API Key hoặc Project. Vui lòng nhấn \"Cấu hình API Key\" để thiết lập.";
pub const CONNECTION_MESSAGE: &str = "Lỗi kết nối API. Vui lòng kiểm tra lại cấu hình.";
pub const GENERIC_MESSAGE: &str = "Đã xảy ra lỗi trong quá trình phân tích.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Model output was not the JSON we asked for; usually an oversized lesson.
    MalformedData,
    /// Credential or project missing.
    KeyOrProjectNotFound,
    /// Any other failure that mentions the credential.
    Connection,
    Unclassified,
}

impl FailureCategory {
    /// Checked in order; the first match wins.
    pub fn classify(raw_message: &str) -> Self {
        if raw_message.contains("JSON") {
            FailureCategory::MalformedData
        } else if raw_message.contains("404") || raw_message.contains("not found") {
            FailureCategory::KeyOrProjectNotFound
        } else if raw_message.contains("API_KEY") {
            FailureCategory::Connection
        } else {
            FailureCategory::Unclassified
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            FailureCategory::MalformedData => MALFORMED_DATA_MESSAGE,
            FailureCategory::KeyOrProjectNotFound => KEY_NOT_FOUND_MESSAGE,
            FailureCategory::Connection => CONNECTION_MESSAGE,
            FailureCategory::Unclassified => GENERIC_MESSAGE,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FailureCategory::MalformedData => "INFERENCE_JSON_ERROR",
            FailureCategory::KeyOrProjectNotFound => "INFERENCE_AUTH_OR_NOT_FOUND",
            FailureCategory::Connection => "INFERENCE_CONNECTION_ERROR",
            FailureCategory::Unclassified => "INFERENCE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    #[test]
    fn test_json_wins_over_everything() {
        assert_eq!(
            FailureCategory::classify("404 not found API_KEY JSON"),
            FailureCategory::MalformedData
        );
    }

    #[test]
    fn test_not_found_variants() {
        assert_eq!(
            FailureCategory::classify("API error (status 404): NOT_FOUND"),
            FailureCategory::KeyOrProjectNotFound
        );
        assert_eq!(
            FailureCategory::classify("Requested entity was not found."),
            FailureCategory::KeyOrProjectNotFound
        );
    }

    #[test]
    fn test_credential_keyword_is_connection() {
        assert_eq!(
            FailureCategory::classify("API error (status 400): INVALID_ARGUMENT: API key not valid. [API_KEY_INVALID]"),
            FailureCategory::Connection
        );
    }

    #[test]
    fn test_anything_else_is_unclassified() {
        assert_eq!(
            FailureCategory::classify("HTTP error: connection refused"),
            FailureCategory::Unclassified
        );
    }

    #[test]
    fn test_parse_error_display_classifies_as_malformed() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let message = LlmError::Parse(parse).to_string();
        assert_eq!(FailureCategory::classify(&message), FailureCategory::MalformedData);
    }
}
