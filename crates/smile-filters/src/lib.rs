//! smile-filters: deterministic pixel filters for smile-design previews
//!
//! This library maps an immutable source photo plus a set of slider
//! percentages to a freshly rendered RGBA buffer. It contains the
//! tooth-colour heuristic, the whitening and brightness filters, the
//! adjustment pipeline that orders them, the overlay decision and the
//! split before/after compositor.
//!
//! It performs no I/O, decoding or encoding; callers hand in decoded RGBA8
//! pixels and receive RGBA8 pixels back.
//!
//! # Quick Start
//!
//! ```
//! use smile_filters::{pipeline, AdjustmentId, AdjustmentParameters, SourceImage};
//!
//! let image = SourceImage::from_rgba(2, 1, vec![200, 190, 170, 255, 10, 10, 10, 255]).unwrap();
//! let params = AdjustmentParameters::new()
//!     .with(AdjustmentId::Whitening, 100)
//!     .unwrap();
//!
//! let out = pipeline::render(&image, &params);
//! assert!(out.pixel(0, 0)[2] > 170); // tooth-like pixel whitened
//! assert_eq!(out.pixel(1, 0), [10, 10, 10, 255]); // dark pixel untouched
//! ```
//!
//! # Split View
//!
//! ```
//! use smile_filters::{render_split, AdjustmentParameters, SourceImage};
//!
//! let image = SourceImage::solid(8, 4, [180, 170, 160, 255]);
//! let result = render_split(&image, &AdjustmentParameters::new(), 0.5).unwrap();
//!
//! assert_eq!(result.layout.before.width, 4);
//! assert_eq!(result.layout.labels[1].text, "After");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! SourceImage (immutable RGBA8)
//!     |
//!     v
//! copy into fresh PixelBuffer
//!     |
//!     +--> whitening > 0 ?   Whitening(whitening / 100)
//!     |                        only pixels passing is_tooth_like()
//!     |
//!     +--> brightness > 0 ?  Brightness(brightness / 100)
//!     |                        only pixels with a channel > 80,
//!     |                        sees the already-whitened values
//!     |
//!     +--> alignment / gum / tooth_shape: no pixel effect
//!     |
//!     v
//! PixelBuffer
//! ```
//!
//! ## Rounding
//!
//! Filter arithmetic runs in `f64`. Each channel result is rounded half
//! away from zero and clamped to `0..=255`, so out-of-range values are
//! never an error.
//!
//! ## Inert adjustments
//!
//! `alignment`, `gum` and `tooth_shape` are part of every
//! [`AdjustmentParameters`] so presets and sliders keep a stable shape,
//! but they do not change pixels. Realistic versions would need tooth
//! segmentation, which this crate does not attempt. `alignment` does feed
//! [`overlay_visible`].
//!
//! ## Parallelism
//!
//! Every filter output depends only on the same pixel's input channels.
//! Rows or tiles can therefore be processed independently in any order;
//! see [`pipeline::apply_adjustments`], which works on arbitrary pixel
//! slices.

pub mod error;
pub mod filter;
pub mod output;
pub mod params;
pub mod pipeline;
pub mod pixel;


pub use error::AdjustError;
pub use filter::{Brightness, Intensity, PixelFilter, Whitening};
pub use output::{
    detection_zone, overlay_visible, render_split, CompositeResult, DetectionZone, Label,
    LabelBox, Separator, SplitLayout, OVERLAY_THRESHOLD,
};
pub use params::{AdjustmentId, AdjustmentParameters, ParamError};
pub use pipeline::render;
pub use pixel::{is_tooth_like, PixelBuffer, RenderRegion, SourceImage};
