//! Tooth whitening.

use super::{to_channel, Intensity, PixelFilter};
use crate::pixel::is_tooth_like;

/// Whitening factor at full intensity.
pub const WHITEN_SCALE: f64 = 0.3;
/// Extra push on blue to counteract a yellow cast.
pub const BLUE_BOOST: f64 = 1.2;

/// Blends tooth-like pixels toward white.
///
/// With `f = intensity * 0.3`, each classified pixel becomes
/// `c + (255 - c) * f` on red and green and `b + (255 - b) * f * 1.2` on
/// blue. Pixels that fail [`is_tooth_like`] stay byte-identical.
///
/// # Example
///
/// ```
/// use smile_filters::filter::{Intensity, PixelFilter, Whitening};
///
/// let mut px = [200, 190, 170, 255];
/// Whitening::new(Intensity::from_percent(50)).apply_pixel(&mut px);
/// assert_eq!(px, [208, 200, 185, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whitening {
    factor: f64,
}

impl Whitening {
    #[inline]
    pub fn new(intensity: Intensity) -> Self {
        Self {
            factor: intensity.value() * WHITEN_SCALE,
        }
    }

    /// The blend factor toward white for red and green.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl PixelFilter for Whitening {
    #[inline]
    fn apply_pixel(&self, rgba: &mut [u8]) {
        let (r, g, b) = (rgba[0], rgba[1], rgba[2]);
        if !is_tooth_like(r, g, b) {
            return;
        }
        rgba[0] = lift(r, self.factor, 1.0);
        rgba[1] = lift(g, self.factor, 1.0);
        rgba[2] = lift(b, self.factor, BLUE_BOOST);
    }
}

#[inline]
fn lift(channel: u8, factor: f64, boost: f64) -> u8 {
    let c = channel as f64;
    to_channel(c + (255.0 - c) * factor * boost)
}
