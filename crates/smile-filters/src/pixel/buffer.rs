//! Owned, mutable render target.

use super::source::{byte_len, SourceImage};

/// A densely packed RGBA8 output buffer.
///
/// Produced fresh by every render; never shares storage with the
/// [`SourceImage`] it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// A transparent-black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; byte_len(width, height)],
            width,
            height,
        }
    }

    /// A copy of the source pixels.
    pub fn from_source(image: &SourceImage) -> Self {
        Self {
            data: image.as_bytes().to_vec(),
            width: image.width(),
            height: image.height(),
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

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the RGBA8 bytes.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Iterate pixels as 4-byte chunks.
    #[inline]
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(4)
    }
}
