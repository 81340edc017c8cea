//! Axum route handlers for workspace sessions.

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis;
use crate::controller::{InputUpdate, UploadTarget, Workspace};
use crate::credentials::DIALOG_UNAVAILABLE_MESSAGE;
use crate::errors::AppError;
use crate::extraction::{extract_text, upload_error_message};
use crate::models::analysis::AnalysisRequest;
use crate::models::catalog::{catalog, Catalog};
use crate::render::{export_file_name, to_display_markup, to_document, DOCX_CONTENT_TYPE};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub workspace: Workspace,
}

impl SessionResponse {
    fn new(session_id: Uuid, workspace: Workspace) -> Json<Self> {
        Json(Self {
            session_id,
            workspace,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CredentialDialogResponse {
    pub opened: bool,
    pub message: Option<&'static str>,
}

const NO_RESULT_MESSAGE: &str = "No analysis result in this session";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog())
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (id, workspace) = state.sessions.create().await;
    info!("Created session {id}");
    (StatusCode::CREATED, SessionResponse::new(id, workspace))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let workspace = state.sessions.snapshot(id).await?;
    Ok(SessionResponse::new(id, workspace))
}

/// DELETE /api/v1/sessions/:id
///
/// Discards the workspace. An analysis still in flight finishes unobserved.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!("Discarded session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/inputs
pub async fn handle_update_inputs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<InputUpdate>,
) -> Result<Json<SessionResponse>, AppError> {
    let workspace = state
        .sessions
        .update(id, |ws| ws.apply_inputs(update).map(|_| ws.clone()))
        .await??;
    Ok(SessionResponse::new(id, workspace))
}

/// POST /api/v1/sessions/:id/uploads/:target
///
/// Reads the first multipart file field and replaces the lesson or framework
/// text with its extracted content.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path((id, target)): Path<(Uuid, UploadTarget)>,
    mut multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadRead(e.body_text()))?
        .ok_or_else(|| AppError::Validation("Upload contains no file".to_string()))?;

    let file_name = field.file_name().unwrap_or("upload").to_string();
    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => {
            warn!("Upload of {file_name} could not be read: {}", e.body_text());
            return reject_upload(&state, id, &file_name).await;
        }
    };

    let name = file_name.clone();
    let extracted = tokio::task::spawn_blocking(move || extract_text(&name, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    match extracted {
        Ok(text) => {
            info!(
                "Session {id}: extracted {} chars from {file_name} into {target:?}",
                text.chars().count()
            );
            let workspace = state
                .sessions
                .update(id, |ws| {
                    ws.apply_upload(target, text);
                    ws.clone()
                })
                .await?;
            Ok(SessionResponse::new(id, workspace))
        }
        Err(e) => {
            warn!("Upload of {file_name} rejected: {e}");
            reject_upload(&state, id, &file_name).await
        }
    }
}

async fn reject_upload(
    state: &AppState,
    id: Uuid,
    file_name: &str,
) -> Result<Json<SessionResponse>, AppError> {
    let message = upload_error_message(file_name);
    let notice = message.clone();
    state
        .sessions
        .update(id, move |ws| ws.reject_upload(notice))
        .await?;
    Err(AppError::UploadRead(message))
}

/// POST /api/v1/sessions/:id/analyze
///
/// Full pipeline: guard inputs → build prompt → one inference call → record
/// outcome. The run is detached from the request, so a client that
/// disconnects mid-call still leaves the session in Success or Failed.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let request = state.sessions.update(id, |ws| ws.begin_analysis()).await??;

    let run = tokio::spawn(run_analysis(state.clone(), id, request));
    match run.await {
        Ok(outcome) => outcome,
        Err(join_error) => {
            let raw = join_error.to_string();
            let category = state.sessions.update(id, |ws| ws.fail(&raw)).await?;
            error!("Session {id}: analysis task aborted ({category:?}): {raw}");
            Err(AppError::Internal(anyhow::anyhow!("analysis task aborted: {raw}")))
        }
    }
}

/// Builds the prompt, makes the model call and records the outcome. The
/// session lock is released while the call is in flight.
async fn run_analysis(
    state: AppState,
    id: Uuid,
    request: AnalysisRequest,
) -> Result<Json<SessionResponse>, AppError> {
    let payload = match analysis::build(&request) {
        Ok(payload) => payload,
        Err(e) => {
            let raw = e.to_string();
            state.sessions.update(id, |ws| ws.fail(&raw)).await?;
            return Err(e);
        }
    };

    info!(
        "Session {id}: analyzing lesson ({} chars), subject={}, grade={}, suggestions={}",
        request.lesson_content.chars().count(),
        request.subject,
        request.grade,
        request.num_suggestions
    );

    match state.llm.infer(&payload).await {
        Ok(result) => {
            info!(
                "Session {id}: analysis returned {} integrations",
                result.digital_competencies.len()
            );
            let workspace = state
                .sessions
                .update(id, |ws| {
                    ws.complete(result);
                    ws.clone()
                })
                .await?;
            Ok(SessionResponse::new(id, workspace))
        }
        Err(e) => {
            let raw = e.to_string();
            let category = state.sessions.update(id, |ws| ws.fail(&raw)).await?;
            warn!("Session {id}: analysis failed ({category:?}): {raw}");
            Err(AppError::Inference(category))
        }
    }
}

/// GET /api/v1/sessions/:id/display
pub async fn handle_display(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let workspace = state.sessions.snapshot(id).await?;
    let result = workspace
        .result()
        .ok_or_else(|| AppError::NotFound(NO_RESULT_MESSAGE.to_string()))?;
    Ok(Html(to_display_markup(&result.full_integrated_content)))
}

/// GET /api/v1/sessions/:id/export
///
/// Streams the `.docx` as an attachment. The result stays in the session, so
/// a failed export can simply be retried.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let workspace = state.sessions.snapshot(id).await?;
    let result = workspace
        .result()
        .ok_or_else(|| AppError::NotFound(NO_RESULT_MESSAGE.to_string()))?;

    let bytes = to_document(
        &result.full_integrated_content,
        &workspace.subject,
        &workspace.grade,
    )?;
    let file_name = export_file_name(&workspace.subject, &workspace.grade);
    let disposition = HeaderValue::from_str(&content_disposition(&file_name))
        .map_err(|e| AppError::Export(e.to_string()))?;

    info!("Session {id}: exported {file_name} ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

/// POST /api/v1/credentials/dialog
pub async fn handle_credential_dialog(
    State(state): State<AppState>,
) -> Json<CredentialDialogResponse> {
    let opened = state.credentials.try_open().await;
    Json(CredentialDialogResponse {
        opened,
        message: (!opened).then_some(DIALOG_UNAVAILABLE_MESSAGE),
    })
}

/// `attachment` with an ASCII fallback name and the exact UTF-8 name per RFC 5987.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        percent_encode(file_name)
    )
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_is_ascii() {
        let value = content_disposition("GiaoAn_TichHopSo_Toán_Lớp 5.docx");
        assert!(value.is_ascii());
        assert!(value.contains("filename=\"GiaoAn_TichHopSo_To_n_L_p 5.docx\""));
        assert!(value.contains("filename*=UTF-8''GiaoAn_TichHopSo_To%C3%A1n_L%E1%BB%9Bp%205.docx"));
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
