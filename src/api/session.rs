use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use smile_filters::{overlay_visible, AdjustmentId, AdjustmentParameters};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::catalog::adjustment_map;
use crate::error::ApiError;
use crate::models::{Session, SessionId};
use crate::server::AppState;
use crate::services::SessionStore;

/// Current state of an editing session
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: String,
    pub width: u32,
    pub height: u32,
    /// Percentages keyed by adjustment id
    pub adjustments: BTreeMap<String, u8>,
    /// Name of the applied preset, cleared by any manual change
    pub active_preset: Option<String>,
    /// Whether the after view shows the detection overlay
    pub overlay_visible: bool,
    /// Increases with every parameter change
    pub generation: u64,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let (width, height) = session.source.dimensions();
        Self {
            session_id: session.id.to_string(),
            width,
            height,
            adjustments: adjustment_map(&session.params),
            active_preset: session.active_preset.clone(),
            overlay_visible: overlay_visible(&session.params),
            generation: session.generation,
        }
    }
}

/// Request body for a single slider change
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAdjustmentRequest {
    /// New percentage, 0 to 100
    pub value: i64,
}

/// Get session state
#[utoipa::path(
    get,
    path = "/api/session/{session}",
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Unknown session"),
    ),
    params(("session" = String, Path, description = "Session id")),
    tag = "Session"
)]
pub async fn handle_session(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = SessionId::new(session);
    let session = state
        .sessions
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
    Ok(Json(SessionResponse::from(&session)))
}

/// Replace all adjustments
///
/// The body must contain all five adjustment ids. Nothing changes if any
/// value is missing, unknown or out of range.
#[utoipa::path(
    put,
    path = "/api/session/{session}/adjustments",
    request_body(content = Object, description = "All five adjustment ids mapped to percentages"),
    responses(
        (status = 200, description = "Adjustments replaced", body = SessionResponse),
        (status = 400, description = "Invalid adjustment set"),
        (status = 404, description = "Unknown session"),
    ),
    params(("session" = String, Path, description = "Session id")),
    tag = "Session"
)]
pub async fn handle_replace_adjustments(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(values): Json<BTreeMap<String, i64>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let params = AdjustmentParameters::from_pairs(values)?;
    let id = SessionId::new(session);
    let session = state
        .sessions
        .update(&id, move |s| {
            s.replace_adjustments(params);
            Ok(())
        })
        .await?;

    tracing::info!(session = %id, generation = session.generation, "Adjustments replaced");
    Ok(Json(SessionResponse::from(&session)))
}

/// Change one slider
#[utoipa::path(
    patch,
    path = "/api/session/{session}/adjustments/{id}",
    request_body = SetAdjustmentRequest,
    responses(
        (status = 200, description = "Adjustment updated", body = SessionResponse),
        (status = 400, description = "Unknown adjustment or value out of range"),
        (status = 404, description = "Unknown session"),
    ),
    params(
        ("session" = String, Path, description = "Session id"),
        ("id" = String, Path, description = "Adjustment id, e.g. 'whitening'"),
    ),
    tag = "Session"
)]
pub async fn handle_set_adjustment(
    State(state): State<AppState>,
    Path((session, adjustment)): Path<(String, String)>,
    Json(request): Json<SetAdjustmentRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let adjustment: AdjustmentId = adjustment.parse()?;
    let id = SessionId::new(session);
    let session = state
        .sessions
        .update(&id, move |s| {
            s.set_adjustment(adjustment, request.value)?;
            Ok(())
        })
        .await?;

    tracing::debug!(
        session = %id,
        adjustment = %adjustment,
        value = request.value,
        generation = session.generation,
        "Adjustment changed"
    );
    Ok(Json(SessionResponse::from(&session)))
}

/// Apply a preset
///
/// Accepts the preset name or its slug, case-insensitively.
#[utoipa::path(
    post,
    path = "/api/session/{session}/preset/{name}",
    responses(
        (status = 200, description = "Preset applied", body = SessionResponse),
        (status = 404, description = "Unknown session or preset"),
    ),
    params(
        ("session" = String, Path, description = "Session id"),
        ("name" = String, Path, description = "Preset name or slug, e.g. 'hollywood-smile'"),
    ),
    tag = "Session"
)]
pub async fn handle_apply_preset(
    State(state): State<AppState>,
    Path((session, name)): Path<(String, String)>,
) -> Result<Json<SessionResponse>, ApiError> {
    let preset = state
        .presets
        .find(&name)
        .cloned()
        .ok_or_else(|| ApiError::PresetNotFound(name.clone()))?;
    let id = SessionId::new(session);
    let session = state
        .sessions
        .update(&id, move |s| {
            s.apply_preset(&preset);
            Ok(())
        })
        .await?;

    tracing::info!(
        session = %id,
        preset = session.active_preset.as_deref().unwrap_or_default(),
        "Preset applied"
    );
    Ok(Json(SessionResponse::from(&session)))
}

/// Reset all adjustments to zero
#[utoipa::path(
    post,
    path = "/api/session/{session}/reset",
    responses(
        (status = 200, description = "Adjustments reset", body = SessionResponse),
        (status = 404, description = "Unknown session"),
    ),
    params(("session" = String, Path, description = "Session id")),
    tag = "Session"
)]
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = SessionId::new(session);
    let session = state
        .sessions
        .update(&id, |s| {
            s.reset();
            Ok(())
        })
        .await?;

    tracing::info!(session = %id, "Adjustments reset");
    Ok(Json(SessionResponse::from(&session)))
}
