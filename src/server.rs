//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::models::{AppConfig, PresetCatalog};
use crate::services::{InMemorySessionStore, PreviewCache, RenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub presets: Arc<PresetCatalog>,
    pub sessions: Arc<InMemorySessionStore>,
    pub renderer: Arc<RenderService>,
    pub preview_cache: Arc<PreviewCache>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    create_app_state_with_config(&asset_loader, config)
}

/// Create application state from an explicit configuration.
pub fn create_app_state_with_config(
    asset_loader: &AssetLoader,
    config: AppConfig,
) -> anyhow::Result<AppState> {
    let presets = config
        .preset_catalog()
        .map_err(|e| anyhow::anyhow!("Invalid preset configuration: {e}"))?;

    let sessions = Arc::new(InMemorySessionStore::with_config(config.sessions));

    Ok(AppState {
        config: Arc::new(config),
        presets: Arc::new(presets),
        sessions,
        renderer: Arc::new(RenderService::new(asset_loader)),
        preview_cache: Arc::new(PreviewCache::new()),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    // Oversized uploads reach the handler so it can answer with a JSON 413;
    // anything beyond twice the limit is cut off by axum.
    let body_limit = state.config.upload.max_bytes.saturating_mul(2);

    Router::new()
        // Catalogs
        .route("/api/presets", get(api::handle_presets))
        .route("/api/adjustments", get(api::handle_adjustments))
        // Photo lifecycle
        .route("/api/photo", post(api::handle_upload))
        .route("/api/photo/:session", delete(api::handle_delete_photo))
        // Editing session
        .route("/api/session/:session", get(api::handle_session))
        .route(
            "/api/session/:session/adjustments",
            put(api::handle_replace_adjustments),
        )
        .route(
            "/api/session/:session/adjustments/:id",
            patch(api::handle_set_adjustment),
        )
        .route(
            "/api/session/:session/preset/:name",
            post(api::handle_apply_preset),
        )
        .route("/api/session/:session/reset", post(api::handle_reset))
        // Rendering
        .route("/api/session/:session/preview", get(api::handle_preview))
        .route("/api/session/:session/download", get(api::handle_download))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
