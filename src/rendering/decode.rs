//! Photo upload validation, decoding and canvas fitting.

use image::imageops::FilterType;
use image::ImageFormat;
use smile_filters::SourceImage;
use std::path::Path;

use crate::error::UploadError;
use crate::models::{CanvasConfig, UploadConfig};

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Png,
    Jpeg,
}

impl PhotoFormat {
    /// Parse a `Content-Type` value, ignoring parameters such as charset.
    pub fn from_content_type(content_type: &str) -> Result<Self, UploadError> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "image/png" => Ok(PhotoFormat::Png),
            "image/jpeg" => Ok(PhotoFormat::Jpeg),
            _ => Err(UploadError::UnsupportedMediaType(content_type.to_string())),
        }
    }

    /// Infer the format from a file extension (CLI input).
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(PhotoFormat::Png),
            "jpg" | "jpeg" => Ok(PhotoFormat::Jpeg),
            _ => Err(UploadError::UnsupportedMediaType(format!(
                "file extension '{ext}'"
            ))),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            PhotoFormat::Png => ImageFormat::Png,
            PhotoFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Largest size within `canvas` that keeps the aspect ratio.
///
/// Width is constrained first, then height; fractional results are
/// truncated. Images already inside the bounds keep their size.
pub fn fit_dimensions(width: u32, height: u32, canvas: CanvasConfig) -> (u32, u32) {
    let (max_w, max_h) = (canvas.max_width as f64, canvas.max_height as f64);
    let (mut w, mut h) = (width as f64, height as f64);

    if w > max_w {
        h = h * max_w / w;
        w = max_w;
    }
    if h > max_h {
        w = w * max_h / h;
        h = max_h;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Validate and decode an uploaded photo into a canvas-sized source image.
pub fn decode_photo(
    bytes: &[u8],
    format: PhotoFormat,
    upload: UploadConfig,
    canvas: CanvasConfig,
) -> Result<SourceImage, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > upload.max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            max: upload.max_bytes,
        });
    }

    let decoded = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| UploadError::Decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (original_w, original_h) = rgba.dimensions();
    let (width, height) = fit_dimensions(original_w, original_h, canvas);

    let rgba = if (width, height) == (original_w, original_h) {
        rgba
    } else {
        tracing::debug!(
            from = %format!("{original_w}x{original_h}"),
            to = %format!("{width}x{height}"),
            "Scaling photo to canvas"
        );
        image::imageops::resize(&rgba, width, height, FilterType::Triangle)
    };

    SourceImage::from_rgba(width, height, rgba.into_raw())
        .map_err(|e| UploadError::Decode(e.to_string()))
}
