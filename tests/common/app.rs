//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use smile_studio::assets::AssetLoader;
use smile_studio::models::AppConfig;
use smile_studio::server::{build_router, create_app_state, create_app_state_with_config, AppState};
use smile_studio::services::{InMemorySessionStore, PreviewCache};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub sessions: Arc<InMemorySessionStore>,
    pub preview_cache: Arc<PreviewCache>,
}

impl TestApp {
    /// Create a new test application using the embedded config
    pub fn new() -> Self {
        Self::from_state(Self::create_state())
    }

    /// Create a test application with an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let asset_loader = AssetLoader::new(None, None);
        let state =
            create_app_state_with_config(&asset_loader, config).expect("Failed to create app state");
        Self::from_state(state)
    }

    /// Create application state for custom router configuration
    pub fn create_state() -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        create_app_state(asset_loader).expect("Failed to create app state")
    }

    fn from_state(state: AppState) -> Self {
        let sessions = state.sessions.clone();
        let preview_cache = state.preview_cache.clone();
        Self {
            router: build_router(state),
            sessions,
            preview_cache,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a raw body
    pub async fn post_bytes(&self, path: &str, content_type: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json(&self, path: &str, body: serde_json::Value) -> TestResponse {
        let request = Request::put(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch_json(&self, path: &str, body: serde_json::Value) -> TestResponse {
        let request = Request::patch(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Upload a PNG photo and return the session id
    pub async fn upload_photo(&self, png: Vec<u8>) -> String {
        let response = self.post_bytes("/api/photo", "image/png", png).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {}",
            response.text()
        );

        let json: serde_json::Value = response.json();
        json["session_id"].as_str().unwrap().to_string()
    }

    /// Set one slider and assert the change was accepted
    pub async fn set_adjustment(&self, session: &str, id: &str, value: i64) {
        let response = self
            .patch_json(
                &format!("/api/session/{session}/adjustments/{id}"),
                serde_json::json!({ "value": value }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Setting {id}={value} failed: {}",
            response.text()
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Decode the PNG body
    pub fn image(&self) -> image::RgbaImage {
        image::load_from_memory_with_format(&self.body, image::ImageFormat::Png)
            .expect("Failed to decode PNG response")
            .to_rgba8()
    }
}
