//! Immutable source image.

use crate::error::AdjustError;

/// A decoded photo: `width × height` RGBA8 pixels in row-major order.
///
/// The pipeline only ever reads from a `SourceImage`; every render copies
/// into a fresh [`PixelBuffer`](super::PixelBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Wrap raw RGBA8 bytes.
    ///
    /// Fails with [`AdjustError::InvalidBufferLength`] unless
    /// `rgba.len() == width * height * 4`.
    ///
    /// # Example
    ///
    /// ```
    /// use smile_filters::SourceImage;
    ///
    /// let image = SourceImage::from_rgba(1, 1, vec![10, 20, 30, 255]).unwrap();
    /// assert_eq!(image.pixel(0, 0), [10, 20, 30, 255]);
    /// assert!(SourceImage::from_rgba(2, 2, vec![0; 4]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AdjustError> {
        let expected = byte_len(width, height);
        if rgba.len() != expected {
            return Err(AdjustError::InvalidBufferLength {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            pixels: rgba,
            width,
            height,
        })
    }

    /// A single-colour image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

#[inline]
pub(crate) fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
