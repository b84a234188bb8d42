//! Detection overlay decision.
//!
//! The preview draws a translucent "detection zone" above the edited image
//! when whitening or alignment is strong enough. The decision and the zone
//! geometry are pure functions of the parameters and canvas size; they
//! never affect pixel values.

use crate::params::AdjustmentParameters;

/// Whitening or alignment must exceed this percentage for the overlay.
pub const OVERLAY_THRESHOLD: u8 = 20;

/// Zone width as a fraction of the canvas width.
pub const ZONE_WIDTH_FRACTION: f32 = 0.4;
/// Zone height as a fraction of the canvas height.
pub const ZONE_HEIGHT_FRACTION: f32 = 0.2;
/// Upward shift of the zone centre as a fraction of the canvas height.
pub const ZONE_RAISE_FRACTION: f32 = 0.05;

/// Whether the detection overlay should be drawn.
///
/// # Example
///
/// ```
/// use smile_filters::{overlay_visible, AdjustmentId, AdjustmentParameters};
///
/// let subtle = AdjustmentParameters::new().with(AdjustmentId::Whitening, 20).unwrap();
/// assert!(!overlay_visible(&subtle));
///
/// let strong = AdjustmentParameters::new().with(AdjustmentId::Alignment, 21).unwrap();
/// assert!(overlay_visible(&strong));
/// ```
#[inline]
pub fn overlay_visible(params: &AdjustmentParameters) -> bool {
    params.whitening() > OVERLAY_THRESHOLD || params.alignment() > OVERLAY_THRESHOLD
}

/// A rectangle in canvas coordinates (fractional pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DetectionZone {
    /// Centre point of the zone.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The illustrative zone: `0.4w × 0.2h`, centred at `(w/2, h/2 - 0.05h)`.
pub fn detection_zone(width: u32, height: u32) -> DetectionZone {
    let (w, h) = (width as f32, height as f32);
    let zone_width = w * ZONE_WIDTH_FRACTION;
    let zone_height = h * ZONE_HEIGHT_FRACTION;
    let center_x = w / 2.0;
    let center_y = h / 2.0 - h * ZONE_RAISE_FRACTION;

    DetectionZone {
        x: center_x - zone_width / 2.0,
        y: center_y - zone_height / 2.0,
        width: zone_width,
        height: zone_height,
    }
}
