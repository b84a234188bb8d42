//! SVG annotation layer drawn on top of a rendered frame.
//!
//! Geometry comes from `smile_filters`; this module only turns it into an
//! SVG document the compositor can rasterize.

use smile_filters::{DetectionZone, SplitLayout};

/// Detection zone colour, rgb(30, 136, 229)
const ZONE_COLOR: &str = "#1e88e5";
const ZONE_FILL_OPACITY: f32 = 0.1;
const ZONE_STROKE_OPACITY: f32 = 0.4;
const ZONE_STROKE_WIDTH: f32 = 2.0;

const SEPARATOR_COLOR: &str = "#ffffff";
const LABEL_BACKGROUND_OPACITY: f32 = 0.7;
const LABEL_FONT_SIZE: f32 = 14.0;
const LABEL_FONT_FAMILY: &str = "sans-serif";

/// Shapes to draw over a `width × height` frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLayer {
    width: u32,
    height: u32,
    zone: Option<DetectionZone>,
    split: Option<SplitLayout>,
}

impl AnnotationLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            zone: None,
            split: None,
        }
    }

    pub fn with_detection_zone(mut self, zone: DetectionZone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_split(mut self, layout: SplitLayout) -> Self {
        self.split = Some(layout);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.zone.is_none() && self.split.is_none()
    }

    /// Serialize the layer as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );

        if let Some(zone) = self.zone {
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{ZONE_COLOR}" fill-opacity="{ZONE_FILL_OPACITY}" stroke="{ZONE_COLOR}" stroke-opacity="{ZONE_STROKE_OPACITY}" stroke-width="{ZONE_STROKE_WIDTH}"/>"#,
                zone.x, zone.y, zone.width, zone.height
            ));
        }

        if let Some(layout) = self.split {
            let sep = layout.separator;
            svg.push_str(&format!(
                r#"<line x1="{x}" y1="0" x2="{x}" y2="{}" stroke="{SEPARATOR_COLOR}" stroke-width="{}"/>"#,
                sep.height,
                sep.width,
                x = sep.x
            ));
            for label in layout.labels {
                let bg = label.background;
                svg.push_str(&format!(
                    r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#000000" fill-opacity="{LABEL_BACKGROUND_OPACITY}"/>"##,
                    bg.x, bg.y, bg.width, bg.height
                ));
                svg.push_str(&format!(
                    r##"<text x="{}" y="{}" font-family="{LABEL_FONT_FAMILY}" font-size="{LABEL_FONT_SIZE}" fill="#ffffff">{}</text>"##,
                    label.anchor.0,
                    label.anchor.1,
                    escape_xml(label.text)
                ));
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
