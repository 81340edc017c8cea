use std::sync::Arc;

use crate::config::Config;
use crate::controller::SessionStore;
use crate::credentials::CredentialConfigurator;
use crate::llm_client::InferenceClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Structured inference backend. Default: the Gemini `LlmClient`.
    pub llm: Arc<dyn InferenceClient>,
    pub sessions: SessionStore,
    pub config: Config,
    pub credentials: Arc<dyn CredentialConfigurator>,
}
