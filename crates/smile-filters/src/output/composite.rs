//! Split before/after compositing.
//!
//! [`render_split`] fills the canvas left of the split line with raw
//! source pixels and the rest with pipeline output for that region only.
//! The separator line and the two labels are returned as geometry for the
//! caller's annotation layer; they are not burned into the pixel buffer.
//!
//! Both halves are drawn at full source scale and merely clipped, so the
//! aspect ratio of neither region changes.

use crate::error::AdjustError;
use crate::params::AdjustmentParameters;
use crate::pipeline;
use crate::pixel::{PixelBuffer, RenderRegion, SourceImage};

/// Separator line width in pixels.
pub const SEPARATOR_WIDTH: f32 = 3.0;
/// Label background box size.
pub const LABEL_BOX_WIDTH: f32 = 80.0;
pub const LABEL_BOX_HEIGHT: f32 = 30.0;
/// Distance of the label boxes from the top and side edges.
pub const LABEL_MARGIN: f32 = 10.0;
/// Text baseline of both labels.
pub const LABEL_BASELINE_Y: f32 = 30.0;
/// Horizontal padding between box edge and text start.
pub const LABEL_TEXT_INSET: f32 = 10.0;

pub const BEFORE_LABEL: &str = "Before";
pub const AFTER_LABEL: &str = "After";

/// A rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A text label with its translucent background box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub text: &'static str,
    /// Left end of the text baseline.
    pub anchor: (f32, f32),
    pub background: LabelBox,
}

/// Vertical separator at the split position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separator {
    /// Centre line x coordinate (may be fractional).
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Geometry of a split view for a given canvas and split fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    /// `width * fraction`
    pub split_x: f32,
    /// Columns `x < split_x`: raw source
    pub before: RenderRegion,
    /// Columns `x >= split_x`: edited
    pub after: RenderRegion,
    pub separator: Separator,
    /// `[Before, After]`
    pub labels: [Label; 2],
}

impl SplitLayout {
    /// Compute the layout for a `width × height` canvas.
    ///
    /// `fraction` must be finite and within `0.0..=1.0`.
    pub fn new(width: u32, height: u32, fraction: f32) -> Result<Self, AdjustError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(AdjustError::InvalidSplitFraction(fraction));
        }

        let w = width as f32;
        let split_x = w * fraction;
        // Pixel column x belongs to the "before" side iff x < split_x.
        let before_columns = (split_x.ceil() as u32).min(width);
        let (before, after) = RenderRegion::split_columns(width, height, before_columns);

        let labels = [
            Label {
                text: BEFORE_LABEL,
                anchor: (LABEL_MARGIN + LABEL_TEXT_INSET, LABEL_BASELINE_Y),
                background: LabelBox {
                    x: LABEL_MARGIN,
                    y: LABEL_MARGIN,
                    width: LABEL_BOX_WIDTH,
                    height: LABEL_BOX_HEIGHT,
                },
            },
            Label {
                text: AFTER_LABEL,
                anchor: (
                    w - LABEL_MARGIN - LABEL_BOX_WIDTH + LABEL_TEXT_INSET,
                    LABEL_BASELINE_Y,
                ),
                background: LabelBox {
                    x: w - LABEL_MARGIN - LABEL_BOX_WIDTH,
                    y: LABEL_MARGIN,
                    width: LABEL_BOX_WIDTH,
                    height: LABEL_BOX_HEIGHT,
                },
            },
        ];

        Ok(Self {
            split_x,
            before,
            after,
            separator: Separator {
                x: split_x,
                width: SEPARATOR_WIDTH,
                height: height as f32,
            },
            labels,
        })
    }
}

/// A full-size split rendering plus its annotation geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResult {
    pub buffer: PixelBuffer,
    pub layout: SplitLayout,
}

/// Render a side-by-side before/after view.
///
/// - `split_fraction = 0.0` shows the edited image everywhere
/// - `split_fraction = 1.0` shows the untouched source everywhere
///
/// # Example
///
/// ```
/// use smile_filters::{render_split, AdjustmentId, AdjustmentParameters, SourceImage};
///
/// let image = SourceImage::solid(10, 2, [200, 190, 170, 255]);
/// let params = AdjustmentParameters::new().with(AdjustmentId::Brightness, 100).unwrap();
///
/// let split = render_split(&image, &params, 0.5).unwrap();
/// assert_eq!(split.layout.split_x, 5.0);
/// assert_eq!(split.buffer.pixel(4, 0), [200, 190, 170, 255]);
/// assert_eq!(split.buffer.pixel(5, 0), [230, 220, 200, 255]);
/// ```
pub fn render_split(
    image: &SourceImage,
    params: &AdjustmentParameters,
    split_fraction: f32,
) -> Result<CompositeResult, AdjustError> {
    let layout = SplitLayout::new(image.width(), image.height(), split_fraction)?;

    let mut buffer = PixelBuffer::from_source(image);
    pipeline::render_region_into(image, params, layout.after, &mut buffer)?;

    Ok(CompositeResult { buffer, layout })
}
