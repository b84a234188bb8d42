//! Adjustment identifiers.

use std::fmt;
use std::str::FromStr;

use super::ParamError;

/// One of the five smile-design adjustments.
///
/// Only [`Whitening`](AdjustmentId::Whitening) and
/// [`Brightness`](AdjustmentId::Brightness) change pixels. `Alignment`,
/// `Gum` and `ToothShape` are reserved for geometric edits and are inert in
/// the pipeline; `Alignment` still participates in the overlay decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdjustmentId {
    Whitening,
    Alignment,
    Gum,
    ToothShape,
    Brightness,
}

impl AdjustmentId {
    /// All adjustments in display order.
    pub const ALL: [AdjustmentId; 5] = [
        AdjustmentId::Whitening,
        AdjustmentId::Alignment,
        AdjustmentId::Gum,
        AdjustmentId::ToothShape,
        AdjustmentId::Brightness,
    ];

    /// Wire name (`"tooth_shape"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            AdjustmentId::Whitening => "whitening",
            AdjustmentId::Alignment => "alignment",
            AdjustmentId::Gum => "gum",
            AdjustmentId::ToothShape => "tooth_shape",
            AdjustmentId::Brightness => "brightness",
        }
    }

    /// Human-readable slider label.
    pub fn label(self) -> &'static str {
        match self {
            AdjustmentId::Whitening => "Teeth Whitening",
            AdjustmentId::Alignment => "Alignment",
            AdjustmentId::Gum => "Gum Line",
            AdjustmentId::ToothShape => "Tooth Shape",
            AdjustmentId::Brightness => "Smile Brightness",
        }
    }

    /// Whether the adjustment changes pixel values.
    pub fn affects_pixels(self) -> bool {
        matches!(self, AdjustmentId::Whitening | AdjustmentId::Brightness)
    }
}

impl fmt::Display for AdjustmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentId {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdjustmentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParamError::UnknownAdjustment(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_wire_names() {
        for id in AdjustmentId::ALL {
            assert_eq!(id.as_str().parse::<AdjustmentId>(), Ok(id));
        }
    }

    #[test]
    fn test_rejects_unknown_and_differently_cased_names() {
        assert_eq!(
            "toothshape".parse::<AdjustmentId>(),
            Err(ParamError::UnknownAdjustment("toothshape".into()))
        );
        assert!("Whitening".parse::<AdjustmentId>().is_err());
    }

    #[test]
    fn test_only_whitening_and_brightness_affect_pixels() {
        let active: Vec<_> = AdjustmentId::ALL
            .into_iter()
            .filter(|id| id.affects_pixels())
            .collect();
        assert_eq!(active, vec![AdjustmentId::Whitening, AdjustmentId::Brightness]);
    }
}
