use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use smile_filters::PixelBuffer;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::{Session, SessionId, ViewMode};
use crate::rendering::EXPORT_FILENAME;
use crate::server::AppState;
use crate::services::{CachedFrame, SessionStore};

/// Query parameters for the preview endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct PreviewQuery {
    /// "after" (default), "before" or "split"
    pub view: Option<String>,
    /// Split position as a fraction of the width, 0.0 to 1.0 (default 0.5)
    pub split: Option<f32>,
}

/// Render a preview frame
///
/// - `after`: edited photo with the detection overlay when whitening or
///   alignment exceeds 20%
/// - `before`: the photo as uploaded
/// - `split`: original left of the split line, edited right of it, with
///   separator and labels
#[utoipa::path(
    get,
    path = "/api/session/{session}/preview",
    responses(
        (status = 200, description = "PNG frame", content_type = "image/png"),
        (status = 400, description = "Unknown view or split outside 0..1"),
        (status = 404, description = "Unknown session"),
        (status = 500, description = "Rendering error"),
    ),
    params(
        ("session" = String, Path, description = "Session id"),
        PreviewQuery,
    ),
    tag = "Rendering"
)]
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    let view =
        ViewMode::parse(query.view.as_deref(), query.split).map_err(ApiError::InvalidRequest)?;
    let session = load_session(&state, session).await?;

    let edited = match view {
        ViewMode::After => Some(edited_frame(&state, &session).await?),
        _ => None,
    };
    let png_bytes = state
        .renderer
        .render_view_png(session.source.clone(), session.params, view, edited)
        .await?;

    tracing::debug!(
        session = %session.id,
        view = view.name(),
        size_bytes = png_bytes.len(),
        "Preview rendered"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}

/// Download the edited photo
///
/// The export is the edited frame at full canvas size, without overlay or
/// labels.
#[utoipa::path(
    get,
    path = "/api/session/{session}/download",
    responses(
        (status = 200, description = "PNG attachment", content_type = "image/png"),
        (status = 404, description = "Unknown session"),
    ),
    params(("session" = String, Path, description = "Session id")),
    tag = "Rendering"
)]
pub async fn handle_download(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Response, ApiError> {
    let session = load_session(&state, session).await?;
    let frame = edited_frame(&state, &session).await?;
    let png_bytes = state.renderer.encode(frame).await?;

    tracing::info!(
        session = %session.id,
        generation = session.generation,
        size_bytes = png_bytes.len(),
        "Design exported"
    );

    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}

async fn load_session(state: &AppState, session: String) -> Result<Session, ApiError> {
    let id = SessionId::new(session);
    state
        .sessions
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
}

/// Edited frame for the session's current parameters, from cache if fresh.
async fn edited_frame(state: &AppState, session: &Session) -> Result<Arc<PixelBuffer>, ApiError> {
    if let Some(frame) = state
        .preview_cache
        .get(&session.id, session.generation)
        .await
    {
        tracing::trace!(session = %session.id, generation = session.generation, "Frame cache hit");
        return Ok(frame.buffer);
    }

    let buffer = Arc::new(
        state
            .renderer
            .render_edited(session.source.clone(), session.params)
            .await?,
    );
    state
        .preview_cache
        .store(
            &session.id,
            CachedFrame {
                generation: session.generation,
                buffer: buffer.clone(),
            },
        )
        .await;

    // deleted or evicted while rendering; sessions go before their frames
    if !state.sessions.contains(&session.id).await? {
        state.preview_cache.remove(&session.id).await;
        tracing::debug!(session = %session.id, "Dropped frame of removed session");
    }
    Ok(buffer)
}
