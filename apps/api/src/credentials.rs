//! Credential configurator: Opens a host-provided key dialog when one exists.

use async_trait::async_trait;

/// Reported when no dialog can be opened.
pub const DIALOG_UNAVAILABLE_MESSAGE: &str =
    "Tính năng chọn API Key chỉ khả dụng trong môi trường lưu trữ có hỗ trợ.";

#[async_trait]
pub trait CredentialConfigurator: Send + Sync {
    /// Opens the dialog; `false` when the host has none.
    async fn try_open(&self) -> bool;
}

/// Standalone default: there is never a host dialog.
pub struct UnavailableConfigurator;

#[async_trait]
impl CredentialConfigurator for UnavailableConfigurator {
    async fn try_open(&self) -> bool {
        false
    }
}
