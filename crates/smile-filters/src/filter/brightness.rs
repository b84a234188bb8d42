//! Smile brightness lift.

use super::{to_channel, Intensity, PixelFilter};

/// Boost added to every channel at full intensity.
pub const BRIGHTNESS_SCALE: f64 = 30.0;
/// A pixel is lifted only if some channel is strictly above this.
pub const BRIGHTNESS_GATE: u8 = 80;

/// Adds a flat boost to pixels that are already moderately bright.
///
/// `boost = intensity * 30`; a pixel with any channel `> 80` gets `boost`
/// added to R, G and B, each clamped to 255 independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    boost: f64,
}

impl Brightness {
    #[inline]
    pub fn new(intensity: Intensity) -> Self {
        Self {
            boost: intensity.value() * BRIGHTNESS_SCALE,
        }
    }

    #[inline]
    pub fn boost(&self) -> f64 {
        self.boost
    }
}

impl PixelFilter for Brightness {
    #[inline]
    fn apply_pixel(&self, rgba: &mut [u8]) {
        if rgba[..3].iter().all(|&c| c <= BRIGHTNESS_GATE) {
            return;
        }
        for c in &mut rgba[..3] {
            *c = to_channel(*c as f64 + self.boost);
        }
    }
}
