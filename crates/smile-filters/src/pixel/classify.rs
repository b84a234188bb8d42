//! Tooth-colour heuristic.
//!
//! A pixel is "tooth-like" when it is bright on every channel, carries a
//! yellow/cream tint (red over green over blue-with-slack) and is not
//! strongly saturated. This is a coarse per-pixel rule, not a segmentation
//! model: bright cream skin highlights will also match.

/// Red must be strictly above this.
pub const MIN_RED: u8 = 120;
/// Green must be strictly above this.
pub const MIN_GREEN: u8 = 100;
/// Blue must be strictly above this.
pub const MIN_BLUE: u8 = 80;
/// Green may sit this far below blue and still count as cream.
pub const BLUE_SLACK: i16 = 20;
/// `|r - g|` must stay strictly below this.
pub const MAX_RED_GREEN_SPREAD: i16 = 50;

/// Decide whether an RGB triple looks like tooth enamel.
///
/// # Example
///
/// ```
/// use smile_filters::is_tooth_like;
///
/// assert!(is_tooth_like(200, 190, 170));
/// assert!(!is_tooth_like(119, 101, 81));
/// ```
#[inline]
pub fn is_tooth_like(r: u8, g: u8, b: u8) -> bool {
    let (ri, gi, bi) = (r as i16, g as i16, b as i16);

    let bright = r > MIN_RED && g > MIN_GREEN && b > MIN_BLUE;
    let cream = ri >= gi && gi >= bi - BLUE_SLACK;
    let muted = (ri - gi).abs() < MAX_RED_GREEN_SPREAD;

    bright && cream && muted
}
