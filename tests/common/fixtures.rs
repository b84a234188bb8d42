//! Test fixtures: generated photos and pixel constants.

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Warm off-white that passes the tooth classifier
pub const TOOTH: [u8; 4] = [200, 190, 170, 255];

/// `TOOTH` after 50% whitening
pub const TOOTH_WHITENED_50: [u8; 4] = [208, 200, 185, 255];

/// Dark red lip tone, rejected by the tooth classifier but above the
/// brightness gate
pub const LIP: [u8; 4] = [150, 40, 50, 255];

/// Width and height of the default test photo
pub const PHOTO_SIZE: (u32, u32) = (120, 80);

/// Solid photo of the given colour
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, Rgba(rgba))
}

/// Default test photo: teeth colour on the top half, lips below
pub fn portrait() -> RgbaImage {
    let (w, h) = PHOTO_SIZE;
    ImageBuffer::from_fn(w, h, |_, y| {
        if y < h / 2 {
            Rgba(TOOTH)
        } else {
            Rgba(LIP)
        }
    })
}

/// Encode an image as PNG
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    out.into_inner()
}

/// Encode an image as JPEG (alpha dropped)
pub fn jpeg_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone())
        .to_rgb8()
        .write_to(&mut out, ImageFormat::Jpeg)
        .expect("Failed to encode JPEG fixture");
    out.into_inner()
}

/// PNG bytes of the default test photo
pub fn portrait_png() -> Vec<u8> {
    png_bytes(&portrait())
}

/// Pixel of a decoded image as an array
pub fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    image.get_pixel(x, y).0
}
