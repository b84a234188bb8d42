use crate::assets::AssetLoader;
use crate::error::{ApiError, RenderError};
use crate::models::{CanvasConfig, UploadConfig, ViewMode};
use crate::rendering::{decode_photo, encode_png, Compositor, PhotoFormat};
use smile_filters::{pipeline, AdjustmentParameters, PixelBuffer, SourceImage};
use std::sync::Arc;

/// Runs decoding, filtering and encoding on the blocking thread pool.
pub struct RenderService {
    /// The frame compositor (public for CLI access)
    pub compositor: Arc<Compositor>,
}

impl RenderService {
    pub fn new(asset_loader: &AssetLoader) -> Self {
        Self {
            compositor: Arc::new(Compositor::with_fonts(asset_loader.get_fonts())),
        }
    }

    /// Validate and decode an upload into a canvas-sized source image.
    pub async fn decode(
        &self,
        bytes: axum::body::Bytes,
        format: PhotoFormat,
        upload: UploadConfig,
        canvas: CanvasConfig,
    ) -> Result<SourceImage, ApiError> {
        let image = run_blocking(move || Ok(decode_photo(&bytes, format, upload, canvas)))
            .await??;
        Ok(image)
    }

    /// Full pipeline output without annotations.
    pub async fn render_edited(
        &self,
        source: Arc<SourceImage>,
        params: AdjustmentParameters,
    ) -> Result<PixelBuffer, RenderError> {
        run_blocking(move || Ok(pipeline::render(&source, &params))).await
    }

    /// Render and encode the frame for `view`.
    pub async fn render_view_png(
        &self,
        source: Arc<SourceImage>,
        params: AdjustmentParameters,
        view: ViewMode,
        edited: Option<Arc<PixelBuffer>>,
    ) -> Result<Vec<u8>, RenderError> {
        let compositor = self.compositor.clone();
        run_blocking(move || {
            let frame = compositor.render_frame(&source, &params, view, edited.as_deref())?;
            encode_png(&frame)
        })
        .await
    }

    pub async fn encode(&self, buffer: Arc<PixelBuffer>) -> Result<Vec<u8>, RenderError> {
        run_blocking(move || encode_png(&buffer)).await
    }
}

/// Execute CPU-intensive work in a blocking context
async fn run_blocking<T, F>(work: F) -> Result<T, RenderError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RenderError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}
