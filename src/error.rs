use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use smile_filters::{AdjustError, ParamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons an uploaded photo cannot become a session image.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported media type: {0} (expected image/png or image/jpeg)")]
    UnsupportedMediaType(String),

    #[error("Photo too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Empty upload")]
    Empty,

    #[error("Could not decode photo: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Adjustment error: {0}")]
    Adjust(#[from] AdjustError),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) | ApiError::PresetNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidParameter(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upload(UploadError::UnsupportedMediaType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upload(UploadError::Empty) => StatusCode::BAD_REQUEST,
            ApiError::Upload(UploadError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
