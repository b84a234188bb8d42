//! Per-pixel smile filters.
//!
//! Each filter reads and writes only the RGB channels of one pixel at a
//! time, so a buffer can be processed in any order (rows, tiles, threads)
//! with identical results. Alpha is never modified.
//!
//! Channel results are computed in `f64`, rounded half away from zero and
//! clamped to `0..=255`.

mod brightness;
mod whitening;

pub use brightness::{Brightness, BRIGHTNESS_GATE, BRIGHTNESS_SCALE};
pub use whitening::{Whitening, BLUE_BOOST, WHITEN_SCALE};

/// Normalised filter strength in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Intensity(f64);

impl Intensity {
    pub const ZERO: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Clamp `value` into `0.0..=1.0` (NaN becomes zero).
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// `percent / 100`, saturating at 100.
    #[inline]
    pub fn from_percent(percent: u8) -> Self {
        Self(percent.min(100) as f64 / 100.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// A filter that transforms pixels independently of their neighbours.
pub trait PixelFilter {
    /// Transform one RGBA pixel in place. `rgba` is exactly 4 bytes.
    fn apply_pixel(&self, rgba: &mut [u8]);

    /// Transform every pixel of a packed RGBA8 slice.
    ///
    /// Trailing bytes that do not form a whole pixel are left untouched.
    fn apply(&self, pixels: &mut [u8]) {
        for rgba in pixels.chunks_exact_mut(4) {
            self.apply_pixel(rgba);
        }
    }
}

/// Round and clamp a channel value.
#[inline]
pub(crate) fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
