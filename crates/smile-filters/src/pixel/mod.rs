//! Pixel containers and the tooth-colour classifier.
//!
//! - [`SourceImage`]: the immutable decoded photo
//! - [`PixelBuffer`]: a fresh output buffer per render
//! - [`RenderRegion`]: a rectangle used to scope rendering
//! - [`is_tooth_like`]: the per-pixel tooth heuristic

mod buffer;
pub mod classify;
mod region;
mod source;

pub use buffer::PixelBuffer;
pub use classify::is_tooth_like;
pub use region::RenderRegion;
pub use source::SourceImage;
