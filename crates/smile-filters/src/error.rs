//! Unified error type for the smile-filters public API.
//!
//! [`AdjustError`] wraps parameter validation failures and buffer geometry
//! errors into a single enum for convenient `?` propagation.

use crate::params::ParamError;
use crate::pixel::RenderRegion;
use std::fmt;

/// Unified error type for the smile-filters public API.
///
/// Per-pixel arithmetic never fails (it clamps); every variant here is a
/// caller error that is deterministic for the same input.
///
/// # Example
///
/// ```
/// use smile_filters::{AdjustError, AdjustmentId, AdjustmentParameters};
///
/// fn strong_whitening() -> Result<AdjustmentParameters, AdjustError> {
///     let params = AdjustmentParameters::new().with(AdjustmentId::Whitening, 90)?;
///     Ok(params)
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustError {
    /// Malformed adjustment parameters (unknown key, missing key, out of range)
    InvalidParameter(ParamError),
    /// Output buffer dimensions differ from the source image
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Raw pixel data does not hold exactly `width * height * 4` bytes
    InvalidBufferLength { expected: usize, actual: usize },
    /// A render region extends past the canvas
    RegionOutOfBounds {
        region: RenderRegion,
        width: u32,
        height: u32,
    },
    /// Split fraction is NaN or outside `0.0..=1.0`
    InvalidSplitFraction(f32),
}

impl fmt::Display for AdjustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustError::InvalidParameter(err) => write!(f, "invalid parameter: {}", err),
            AdjustError::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            AdjustError::InvalidBufferLength { expected, actual } => write!(
                f,
                "invalid buffer length: expected {} bytes, got {}",
                expected, actual
            ),
            AdjustError::RegionOutOfBounds {
                region,
                width,
                height,
            } => write!(
                f,
                "region {}x{}+{}+{} exceeds {}x{} canvas",
                region.width, region.height, region.x, region.y, width, height
            ),
            AdjustError::InvalidSplitFraction(value) => {
                write!(f, "split fraction must be within 0..=1, got {}", value)
            }
        }
    }
}

impl std::error::Error for AdjustError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdjustError::InvalidParameter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParamError> for AdjustError {
    fn from(err: ParamError) -> Self {
        AdjustError::InvalidParameter(err)
    }
}
