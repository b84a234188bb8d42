use crate::error::RenderError;
use crate::models::ViewMode;
use crate::rendering::annotations::AnnotationLayer;
use resvg::usvg::{self, Transform};
use smile_filters::{
    detection_zone, overlay_visible, pipeline, render_split, AdjustmentParameters, PixelBuffer,
    SourceImage,
};
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Produces display frames: pipeline output plus the annotation layer.
///
/// - `After`: edited image, detection zone when the overlay is visible
/// - `Before`: untouched source, no annotations
/// - `Split`: before/after composite with separator and labels
pub struct Compositor {
    /// Font database for label text
    fontdb: Arc<fontdb::Database>,
}

impl Compositor {
    /// Create a compositor with fonts loaded from the provided data
    pub fn with_fonts(fonts: Vec<(String, Vec<u8>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data);
            tracing::debug!(font = %name, "Loaded font");
        }

        // Load system fonts as fallback
        fontdb.load_system_fonts();

        tracing::info!(font_count = fontdb.len(), "Loaded fonts for label rendering");

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a compositor with system fonts only
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Render the frame for `view`.
    ///
    /// `edited` may carry an already rendered full edit of `source` with
    /// `params`; it is used for the `After` view instead of re-rendering.
    pub fn render_frame(
        &self,
        source: &SourceImage,
        params: &AdjustmentParameters,
        view: ViewMode,
        edited: Option<&PixelBuffer>,
    ) -> Result<PixelBuffer, RenderError> {
        let (width, height) = source.dimensions();
        let layer = AnnotationLayer::new(width, height);

        let (buffer, layer) = match view {
            ViewMode::Before => (PixelBuffer::from_source(source), layer),
            ViewMode::After => {
                let buffer = match edited {
                    Some(frame) if frame.dimensions() == source.dimensions() => frame.clone(),
                    _ => pipeline::render(source, params),
                };
                let layer = if overlay_visible(params) {
                    layer.with_detection_zone(detection_zone(width, height))
                } else {
                    layer
                };
                (buffer, layer)
            }
            ViewMode::Split(fraction) => {
                let composite = render_split(source, params, fraction)?;
                (composite.buffer, layer.with_split(composite.layout))
            }
        };

        self.annotate(buffer, &layer)
    }

    /// Rasterize `layer` over `buffer`.
    ///
    /// The layer is drawn into its own transparent pixmap and blended
    /// source-over; pixels the layer does not cover keep their exact bytes.
    pub fn annotate(
        &self,
        mut buffer: PixelBuffer,
        layer: &AnnotationLayer,
    ) -> Result<PixelBuffer, RenderError> {
        if layer.is_empty() {
            return Ok(buffer);
        }

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&layer.to_svg(), &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut overlay =
            Pixmap::new(buffer.width(), buffer.height()).ok_or(RenderError::PixmapAllocation)?;
        resvg::render(&tree, Transform::identity(), &mut overlay.as_mut());
        blend_over(&overlay, &mut buffer);

        Ok(buffer)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Source-over blend of a premultiplied overlay onto straight-alpha RGBA.
///
/// Only pixels with overlay alpha above zero are written.
fn blend_over(overlay: &Pixmap, buffer: &mut PixelBuffer) {
    for (dst, src) in buffer
        .as_mut_bytes()
        .chunks_exact_mut(4)
        .zip(overlay.pixels())
    {
        if src.alpha() == 0 {
            continue;
        }

        let sa = src.alpha() as f64 / 255.0;
        let da = dst[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);

        let src_premul = [src.red(), src.green(), src.blue()];
        for (channel, s) in dst[..3].iter_mut().zip(src_premul) {
            let premul = s as f64 / 255.0 + (*channel as f64 / 255.0) * da * (1.0 - sa);
            *channel = to_byte(premul / out_a);
        }
        dst[3] = to_byte(out_a);
    }
}

fn to_byte(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use smile_filters::AdjustmentId;

    fn source() -> SourceImage {
        SourceImage::solid(100, 60, [200, 190, 170, 255])
    }

    #[test]
    fn test_before_view_is_source() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Whitening, 100)
            .unwrap();

        let frame = compositor
            .render_frame(&source(), &params, ViewMode::Before, None)
            .unwrap();
        assert_eq!(frame.as_bytes(), source().as_bytes());
    }

    #[test]
    fn test_after_view_without_overlay_is_pipeline_output() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Brightness, 100)
            .unwrap();

        let frame = compositor
            .render_frame(&source(), &params, ViewMode::After, None)
            .unwrap();
        assert_eq!(frame, pipeline::render(&source(), &params));
    }

    #[test]
    fn test_after_view_draws_detection_zone() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Alignment, 50)
            .unwrap();
        let plain = pipeline::render(&source(), &params);

        let frame = compositor
            .render_frame(&source(), &params, ViewMode::After, None)
            .unwrap();

        // zone for 100x60: x=30, y=21, 40x12; the stroke runs along x=30
        assert_ne!(frame.pixel(30, 27), plain.pixel(30, 27));
        // far corner is untouched
        assert_eq!(frame.pixel(0, 0), plain.pixel(0, 0));
        assert_eq!(frame.pixel(99, 59), plain.pixel(99, 59));
    }

    #[test]
    fn test_after_view_reuses_matching_edited_frame() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new();
        let marker = PixelBuffer::new(100, 60);

        let frame = compositor
            .render_frame(&source(), &params, ViewMode::After, Some(&marker))
            .unwrap();
        assert_eq!(frame, marker);

        let wrong_size = PixelBuffer::new(10, 10);
        let frame = compositor
            .render_frame(&source(), &params, ViewMode::After, Some(&wrong_size))
            .unwrap();
        assert_eq!(frame.as_bytes(), source().as_bytes());
    }

    #[test]
    fn test_split_view_draws_separator() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Brightness, 100)
            .unwrap();

        let frame = compositor
            .render_frame(&source(), &params, ViewMode::Split(0.5), None)
            .unwrap();

        // separator line centred on x=50 is white
        assert_eq!(frame.pixel(50, 55), [255, 255, 255, 255]);
        // below the labels, away from the line: raw source left, edited right
        assert_eq!(frame.pixel(5, 55), [200, 190, 170, 255]);
        assert_eq!(frame.pixel(95, 55), [230, 220, 200, 255]);
    }

    #[test]
    fn test_split_view_rejects_invalid_fraction() {
        let compositor = Compositor::new();
        let result = compositor.render_frame(
            &source(),
            &AdjustmentParameters::new(),
            ViewMode::Split(2.0),
            None,
        );
        assert!(matches!(result, Err(RenderError::Adjust(_))));
    }

    #[test]
    fn test_empty_layer_is_passthrough() {
        let compositor = Compositor::new();
        let buffer = PixelBuffer::from_source(&source());
        let out = compositor
            .annotate(buffer.clone(), &AnnotationLayer::new(100, 60))
            .unwrap();
        assert_eq!(out, buffer);
    }

    fn translucent() -> SourceImage {
        SourceImage::solid(100, 60, [200, 190, 170, 3])
    }

    #[test]
    fn test_split_view_keeps_translucent_before_half() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Brightness, 100)
            .unwrap();

        let frame = compositor
            .render_frame(&translucent(), &params, ViewMode::Split(0.5), None)
            .unwrap();

        // below the labels and left of the separator: raw source bytes
        for x in 0..45 {
            assert_eq!(frame.pixel(x, 55), [200, 190, 170, 3], "pixel ({x}, 55)");
        }
        // right half is the edited frame, untouched by premultiplication
        assert_eq!(frame.pixel(95, 55), [230, 220, 200, 3]);
        // the opaque separator still replaces what is underneath
        assert_eq!(frame.pixel(50, 55), [255, 255, 255, 255]);
    }

    #[test]
    fn test_after_view_overlay_leaves_translucent_pixels_alone() {
        let compositor = Compositor::new();
        let params = AdjustmentParameters::new()
            .with(AdjustmentId::Alignment, 50)
            .unwrap();

        let frame = compositor
            .render_frame(&translucent(), &params, ViewMode::After, None)
            .unwrap();

        // zone for 100x60 covers x=29..71, y=20..34 including the stroke
        for (x, y) in [(0, 0), (99, 59), (10, 27), (50, 5), (50, 50)] {
            assert_eq!(frame.pixel(x, y), [200, 190, 170, 3], "pixel ({x}, {y})");
        }
        assert_ne!(frame.pixel(50, 27), [200, 190, 170, 3]);
    }

    #[test]
    fn test_blend_over_opaque_destination() {
        let mut overlay = Pixmap::new(2, 1).unwrap();
        overlay.pixels_mut()[0] = tiny_skia::ColorU8::from_rgba(0, 0, 0, 128).premultiply();
        let mut buffer = PixelBuffer::from_source(&SourceImage::solid(2, 1, [200, 100, 50, 255]));

        blend_over(&overlay, &mut buffer);

        assert_eq!(buffer.pixel(0, 0), [100, 50, 25, 255]);
        assert_eq!(buffer.pixel(1, 0), [200, 100, 50, 255]);
    }
}
