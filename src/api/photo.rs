use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{Session, SessionId};
use crate::rendering::PhotoFormat;
use crate::server::AppState;
use crate::services::SessionStore;

/// Response from a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Identifier for all further session requests
    pub session_id: String,
    /// Canvas width after fitting
    pub width: u32,
    /// Canvas height after fitting
    pub height: u32,
}

/// Upload a photo and start an editing session
///
/// The raw image is sent as the request body. Photos larger than the
/// configured canvas are scaled down, keeping their aspect ratio.
#[utoipa::path(
    post,
    path = "/api/photo",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG or JPEG bytes"),
    responses(
        (status = 201, description = "Session created", body = UploadResponse),
        (status = 413, description = "Photo exceeds the upload limit"),
        (status = 415, description = "Not a PNG or JPEG"),
        (status = 422, description = "Photo could not be decoded"),
    ),
    params(
        ("Content-Type" = String, Header, description = "image/png or image/jpeg"),
    ),
    tag = "Photo"
)]
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let format = PhotoFormat::from_content_type(content_type)?;

    let upload_size = body.len();
    let image = state
        .renderer
        .decode(body, format, state.config.upload, state.config.canvas)
        .await?;

    let session = Session::new(SessionId::generate(), image);
    let (width, height) = session.source.dimensions();
    let session_id = session.id.to_string();
    for evicted in state.sessions.insert(session).await? {
        state.preview_cache.remove(&evicted).await;
        tracing::debug!(session = %evicted, "Session evicted");
    }

    tracing::info!(
        session = %session_id,
        format = ?format,
        upload_size,
        width,
        height,
        "Photo loaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            session_id,
            width,
            height,
        }),
    ))
}

/// Discard a photo and its adjustments
#[utoipa::path(
    delete,
    path = "/api/photo/{session}",
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session"),
    ),
    params(
        ("session" = String, Path, description = "Session id from the upload response"),
    ),
    tag = "Photo"
)]
pub async fn handle_delete_photo(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::new(session);
    if !state.sessions.remove(&id).await? {
        return Err(ApiError::SessionNotFound(id.to_string()));
    }
    state.preview_cache.remove(&id).await;

    tracing::info!(session = %id, "Photo discarded");
    Ok(StatusCode::NO_CONTENT)
}
