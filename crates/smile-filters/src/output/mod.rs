//! Presentation-facing outputs: split compositing and the overlay decision.

pub mod composite;
pub mod overlay;

pub use composite::{render_split, CompositeResult, Label, LabelBox, Separator, SplitLayout};
pub use overlay::{detection_zone, overlay_visible, DetectionZone, OVERLAY_THRESHOLD};
