//! The adjustment pipeline.
//!
//! Maps an immutable [`SourceImage`] plus [`AdjustmentParameters`] to a new
//! RGBA buffer. The steps are fixed:
//!
//! 1. copy the source pixels
//! 2. whitening, if `whitening > 0`
//! 3. brightness, if `brightness > 0` (sees the whitened values)
//! 4. `alignment`, `gum`, `tooth_shape`: no pixel effect
//!
//! Rendering is a pure function of its inputs; calling it twice with the
//! same image and parameters yields byte-identical output.

use crate::error::AdjustError;
use crate::filter::{Brightness, Intensity, PixelFilter, Whitening};
use crate::params::AdjustmentParameters;
use crate::pixel::{PixelBuffer, RenderRegion, SourceImage};

/// Render the full image into a fresh buffer.
///
/// # Example
///
/// ```
/// use smile_filters::{pipeline, AdjustmentParameters, SourceImage};
///
/// let image = SourceImage::solid(4, 4, [200, 190, 170, 255]);
/// let out = pipeline::render(&image, &AdjustmentParameters::new());
/// assert_eq!(out.as_bytes(), image.as_bytes());
/// ```
pub fn render(image: &SourceImage, params: &AdjustmentParameters) -> PixelBuffer {
    let mut buffer = PixelBuffer::from_source(image);
    apply_adjustments(params, buffer.as_mut_bytes());
    buffer
}

/// Render the full image into an existing buffer.
///
/// The buffer is fully overwritten. Fails with
/// [`AdjustError::DimensionMismatch`] if its size differs from the image.
pub fn render_into(
    image: &SourceImage,
    params: &AdjustmentParameters,
    out: &mut PixelBuffer,
) -> Result<(), AdjustError> {
    check_dimensions(image, out)?;
    out.as_mut_bytes().copy_from_slice(image.as_bytes());
    apply_adjustments(params, out.as_mut_bytes());
    Ok(())
}

/// Render only `region` of the image into `out`, leaving other pixels as
/// they are.
///
/// Used by the split compositor to avoid filtering the "before" half.
pub fn render_region_into(
    image: &SourceImage,
    params: &AdjustmentParameters,
    region: RenderRegion,
    out: &mut PixelBuffer,
) -> Result<(), AdjustError> {
    check_dimensions(image, out)?;
    if !region.fits_within(image.width(), image.height()) {
        return Err(AdjustError::RegionOutOfBounds {
            region,
            width: image.width(),
            height: image.height(),
        });
    }
    if region.is_empty() {
        return Ok(());
    }

    let stride = image.width() as usize * 4;
    let row_start = region.x as usize * 4;
    let row_len = region.width as usize * 4;
    let src = image.as_bytes();
    let dst = out.as_mut_bytes();

    for y in region.y..region.y + region.height {
        let start = y as usize * stride + row_start;
        let end = start + row_len;
        let row = &mut dst[start..end];
        row.copy_from_slice(&src[start..end]);
        apply_adjustments(params, row);
    }
    Ok(())
}

/// Apply the pixel-affecting adjustments to packed RGBA8 bytes in place.
pub fn apply_adjustments(params: &AdjustmentParameters, pixels: &mut [u8]) {
    if params.whitening() > 0 {
        Whitening::new(Intensity::from_percent(params.whitening())).apply(pixels);
    }
    if params.brightness() > 0 {
        Brightness::new(Intensity::from_percent(params.brightness())).apply(pixels);
    }
    // alignment, gum and tooth_shape: no pixel effect
}

fn check_dimensions(image: &SourceImage, out: &PixelBuffer) -> Result<(), AdjustError> {
    if image.dimensions() != out.dimensions() {
        return Err(AdjustError::DimensionMismatch {
            expected: image.dimensions(),
            actual: out.dimensions(),
        });
    }
    Ok(())
}
