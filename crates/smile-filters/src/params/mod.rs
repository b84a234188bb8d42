//! Adjustment parameters.
//!
//! [`AdjustmentParameters`] holds the five slider percentages. All five are
//! always present; values are validated on the way in so the pipeline can
//! treat any instance as well-formed.

mod adjustment;
mod error;

pub use adjustment::AdjustmentId;
pub use error::ParamError;

/// Upper bound for every adjustment percentage.
pub const MAX_PERCENT: u8 = 100;

/// The full set of adjustment percentages for one render.
///
/// Each value is an integer percentage in `0..=100`. The default is all
/// zero, which renders the source unchanged.
///
/// `alignment`, `gum` and `tooth_shape` are carried for API shape and for
/// the overlay decision but never change pixel output.
///
/// # Example
///
/// ```
/// use smile_filters::{AdjustmentId, AdjustmentParameters};
///
/// let params = AdjustmentParameters::new()
///     .with(AdjustmentId::Whitening, 30)
///     .unwrap();
/// assert_eq!(params.whitening(), 30);
/// assert_eq!(params.get(AdjustmentId::Brightness), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AdjustmentParameters {
    whitening: u8,
    alignment: u8,
    gum: u8,
    tooth_shape: u8,
    brightness: u8,
}

impl AdjustmentParameters {
    /// All-zero parameters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from key/value pairs.
    ///
    /// Every one of the five adjustment keys must appear; unknown keys and
    /// values outside `0..=100` are rejected. A key that appears twice keeps
    /// its last value.
    ///
    /// # Example
    ///
    /// ```
    /// use smile_filters::{AdjustmentParameters, ParamError};
    ///
    /// let params = AdjustmentParameters::from_pairs([
    ///     ("whitening", 30),
    ///     ("alignment", 20),
    ///     ("gum", 15),
    ///     ("tooth_shape", 10),
    ///     ("brightness", 25),
    /// ])
    /// .unwrap();
    /// assert_eq!(params.brightness(), 25);
    ///
    /// let err = AdjustmentParameters::from_pairs([("whitening", 30)]).unwrap_err();
    /// assert!(matches!(err, ParamError::MissingAdjustment(_)));
    /// ```
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut params = Self::new();
        let mut seen = [false; AdjustmentId::ALL.len()];

        for (key, value) in pairs {
            let id: AdjustmentId = key.as_ref().parse()?;
            params.set(id, value)?;
            seen[id as usize] = true;
        }

        if let Some(missing) = AdjustmentId::ALL.into_iter().find(|id| !seen[*id as usize]) {
            return Err(ParamError::MissingAdjustment(missing));
        }

        Ok(params)
    }

    /// Current percentage for `id`.
    #[inline]
    pub fn get(&self, id: AdjustmentId) -> u8 {
        match id {
            AdjustmentId::Whitening => self.whitening,
            AdjustmentId::Alignment => self.alignment,
            AdjustmentId::Gum => self.gum,
            AdjustmentId::ToothShape => self.tooth_shape,
            AdjustmentId::Brightness => self.brightness,
        }
    }

    /// Set one adjustment, rejecting values outside `0..=100`.
    ///
    /// On error the parameters are left unchanged.
    pub fn set(&mut self, id: AdjustmentId, value: i64) -> Result<(), ParamError> {
        if !(0..=MAX_PERCENT as i64).contains(&value) {
            return Err(ParamError::OutOfRange { id, value });
        }
        let value = value as u8;
        match id {
            AdjustmentId::Whitening => self.whitening = value,
            AdjustmentId::Alignment => self.alignment = value,
            AdjustmentId::Gum => self.gum = value,
            AdjustmentId::ToothShape => self.tooth_shape = value,
            AdjustmentId::Brightness => self.brightness = value,
        }
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    #[inline]
    pub fn with(mut self, id: AdjustmentId, value: i64) -> Result<Self, ParamError> {
        self.set(id, value)?;
        Ok(self)
    }

    /// Return every adjustment to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterate `(id, percentage)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (AdjustmentId, u8)> + '_ {
        AdjustmentId::ALL.into_iter().map(|id| (id, self.get(id)))
    }

    #[inline]
    pub fn whitening(&self) -> u8 {
        self.whitening
    }

    #[inline]
    pub fn alignment(&self) -> u8 {
        self.alignment
    }

    #[inline]
    pub fn gum(&self) -> u8 {
        self.gum
    }

    #[inline]
    pub fn tooth_shape(&self) -> u8 {
        self.tooth_shape
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// True when rendering with these parameters reproduces the source.
    #[inline]
    pub fn is_pixel_identity(&self) -> bool {
        self.whitening == 0 && self.brightness == 0
    }
}
