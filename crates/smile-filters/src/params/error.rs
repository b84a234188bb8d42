//! Error type for adjustment parameter validation.

use std::fmt;

use super::AdjustmentId;

/// Error type for building or mutating [`AdjustmentParameters`](super::AdjustmentParameters).
///
/// Parameters are validated at construction time, so a value that made it
/// into an `AdjustmentParameters` is always in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Key is not one of the five known adjustment ids
    UnknownAdjustment(String),
    /// A required adjustment key was absent
    MissingAdjustment(AdjustmentId),
    /// Percentage outside `0..=100`
    OutOfRange {
        /// The adjustment that was being set
        id: AdjustmentId,
        /// The rejected value
        value: i64,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::UnknownAdjustment(key) => {
                write!(f, "unknown adjustment '{}'", key)
            }
            ParamError::MissingAdjustment(id) => {
                write!(f, "missing adjustment '{}'", id)
            }
            ParamError::OutOfRange { id, value } => {
                write!(
                    f,
                    "adjustment '{}' must be between 0 and 100, got {}",
                    id, value
                )
            }
        }
    }
}

impl std::error::Error for ParamError {}
