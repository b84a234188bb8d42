use axum::{extract::State, response::Json};
use serde::Serialize;
use smile_filters::{params::MAX_PERCENT, AdjustmentId};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::Preset;
use crate::server::AppState;

/// A named slider configuration
#[derive(Debug, Serialize, ToSchema)]
pub struct PresetResponse {
    /// Display name, e.g. "Hollywood Smile"
    pub name: String,
    /// URL-friendly name accepted by the preset endpoint
    pub slug: String,
    pub description: String,
    /// Percentages keyed by adjustment id
    pub values: BTreeMap<String, u8>,
}

impl From<&Preset> for PresetResponse {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            slug: preset.slug.clone(),
            description: preset.description.clone(),
            values: adjustment_map(&preset.params),
        }
    }
}

/// Description of one slider
#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentInfo {
    /// Identifier used in requests, e.g. "tooth_shape"
    pub id: String,
    pub label: String,
    pub min: u8,
    pub max: u8,
    pub default: u8,
    pub unit: String,
    /// Whether the slider changes pixel values
    pub affects_pixels: bool,
}

pub(crate) fn adjustment_map(params: &smile_filters::AdjustmentParameters) -> BTreeMap<String, u8> {
    params
        .iter()
        .map(|(id, value)| (id.as_str().to_string(), value))
        .collect()
}

/// List presets
#[utoipa::path(
    get,
    path = "/api/presets",
    responses(
        (status = 200, description = "Preset catalog in display order", body = Vec<PresetResponse>),
    ),
    tag = "Catalog"
)]
pub async fn handle_presets(State(state): State<AppState>) -> Json<Vec<PresetResponse>> {
    Json(state.presets.iter().map(PresetResponse::from).collect())
}

/// List adjustment sliders
#[utoipa::path(
    get,
    path = "/api/adjustments",
    responses(
        (status = 200, description = "Adjustment catalog", body = Vec<AdjustmentInfo>),
    ),
    tag = "Catalog"
)]
pub async fn handle_adjustments() -> Json<Vec<AdjustmentInfo>> {
    Json(
        AdjustmentId::ALL
            .into_iter()
            .map(|id| AdjustmentInfo {
                id: id.as_str().to_string(),
                label: id.label().to_string(),
                min: 0,
                max: MAX_PERCENT,
                default: 0,
                unit: "%".to_string(),
                affects_pixels: id.affects_pixels(),
            })
            .collect(),
    )
}
