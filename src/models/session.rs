use serde::{Deserialize, Serialize};
use smile_filters::{AdjustmentId, AdjustmentParameters, ParamError, SourceImage};
use std::fmt;
use std::sync::Arc;

use crate::models::preset::Preset;

/// Session identifier handed out when a photo is uploaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    const LEN: usize = 16;

    pub fn generate() -> Self {
        use rand::Rng;
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(Self::LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self(id)
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which frame a preview shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    /// Edited image with the detection overlay when visible
    After,
    /// Untouched source, no annotations
    Before,
    /// Source left of `fraction * width`, edited to the right
    Split(f32),
}

impl ViewMode {
    pub const DEFAULT_SPLIT: f32 = 0.5;

    /// Parse a view name plus optional split fraction.
    ///
    /// A missing name means `after`; a missing fraction for `split` means
    /// [`Self::DEFAULT_SPLIT`].
    pub fn parse(view: Option<&str>, split: Option<f32>) -> Result<Self, String> {
        match view.map(str::trim) {
            None | Some("") => Ok(ViewMode::After),
            Some(v) if v.eq_ignore_ascii_case("after") => Ok(ViewMode::After),
            Some(v) if v.eq_ignore_ascii_case("before") => Ok(ViewMode::Before),
            Some(v) if v.eq_ignore_ascii_case("split") => {
                let fraction = split.unwrap_or(Self::DEFAULT_SPLIT);
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(format!(
                        "split must be between 0.0 and 1.0, got {fraction}"
                    ));
                }
                Ok(ViewMode::Split(fraction))
            }
            Some(other) => Err(format!(
                "unknown view '{other}' (expected after, before or split)"
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::After => "after",
            ViewMode::Before => "before",
            ViewMode::Split(_) => "split",
        }
    }
}

/// An uploaded photo and its current slider state.
///
/// The source image is shared and never modified. `generation` increases
/// with every parameter change so late renders of older states can be
/// recognised.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub source: Arc<SourceImage>,
    pub params: AdjustmentParameters,
    /// Name of the applied preset; cleared by any manual change
    pub active_preset: Option<String>,
    pub generation: u64,
}

impl Session {
    pub fn new(id: SessionId, source: SourceImage) -> Self {
        Self {
            id,
            source: Arc::new(source),
            params: AdjustmentParameters::new(),
            active_preset: None,
            generation: 0,
        }
    }

    /// Single slider change. Leaves the session untouched on error.
    pub fn set_adjustment(&mut self, id: AdjustmentId, value: i64) -> Result<(), ParamError> {
        self.params.set(id, value)?;
        self.active_preset = None;
        self.generation += 1;
        Ok(())
    }

    /// Replace all five values at once.
    pub fn replace_adjustments(&mut self, params: AdjustmentParameters) {
        self.params = params;
        self.active_preset = None;
        self.generation += 1;
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        self.params = preset.params;
        self.active_preset = Some(preset.name.clone());
        self.generation += 1;
    }

    pub fn reset(&mut self) {
        self.params.reset();
        self.active_preset = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preset::PresetCatalog;

    fn session() -> Session {
        Session::new(SessionId::new("s1"), SourceImage::solid(4, 4, [200, 190, 170, 255]))
    }

    #[test]
    fn test_session_id_generate() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_eq!(a.as_str().len(), 16);
        assert!(a
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse(None, None), Ok(ViewMode::After));
        assert_eq!(ViewMode::parse(Some("Before"), None), Ok(ViewMode::Before));
        assert_eq!(ViewMode::parse(Some("split"), None), Ok(ViewMode::Split(0.5)));
        assert_eq!(
            ViewMode::parse(Some("split"), Some(0.25)),
            Ok(ViewMode::Split(0.25))
        );
        assert!(ViewMode::parse(Some("split"), Some(1.5)).is_err());
        assert!(ViewMode::parse(Some("split"), Some(f32::NAN)).is_err());
        assert!(ViewMode::parse(Some("sideways"), None).is_err());
    }

    #[test]
    fn test_manual_change_clears_preset() {
        let catalog = PresetCatalog::builtin();
        let mut s = session();

        s.apply_preset(catalog.find("natural-smile").unwrap());
        assert_eq!(s.active_preset.as_deref(), Some("Natural Smile"));
        assert_eq!(s.params.whitening(), 30);

        s.set_adjustment(AdjustmentId::Brightness, 70).unwrap();
        assert_eq!(s.active_preset, None);
        assert_eq!(s.params.brightness(), 70);
        assert_eq!(s.params.whitening(), 30);
        assert_eq!(s.generation, 2);
    }

    #[test]
    fn test_rejected_change_leaves_session_untouched() {
        let catalog = PresetCatalog::builtin();
        let mut s = session();
        s.apply_preset(catalog.find("Hollywood Smile").unwrap());
        let before = s.params;

        assert!(s.set_adjustment(AdjustmentId::Gum, 101).is_err());
        assert_eq!(s.params, before);
        assert_eq!(s.active_preset.as_deref(), Some("Hollywood Smile"));
        assert_eq!(s.generation, 1);
    }

    #[test]
    fn test_reset() {
        let mut s = session();
        s.set_adjustment(AdjustmentId::Whitening, 80).unwrap();
        s.reset();
        assert!(s.params.iter().all(|(_, v)| v == 0));
        assert_eq!(s.active_preset, None);
    }
}
