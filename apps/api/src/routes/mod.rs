pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::controller::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        // Workspace sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/inputs",
            put(handlers::handle_update_inputs),
        )
        .route(
            "/api/v1/sessions/:id/uploads/:target",
            post(handlers::handle_upload),
        )
        .route(
            "/api/v1/sessions/:id/analyze",
            post(handlers::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:id/display",
            get(handlers::handle_display),
        )
        .route("/api/v1/sessions/:id/export", get(handlers::handle_export))
        .route(
            "/api/v1/credentials/dialog",
            post(handlers::handle_credential_dialog),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
