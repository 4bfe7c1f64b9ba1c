//! Easing curves for the size transition.
//!
//! A curve maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.

use serde::Deserialize;

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing.
    Linear,
    /// Quadratic, starts slow.
    EaseIn,
    /// Quadratic, ends slow.
    EaseOut,
    /// Quadratic, slow at both ends. The platform default for view animations.
    #[default]
    EaseInOut,
    /// Cubic, slow at both ends.
    EaseInOutCubic,
}

/// Apply `easing` to progress `t`. Input outside `[0, 1]` is clamped.
///
/// ```
/// use tagflow::widget::animation::{Easing, ease};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        Easing::EaseInOut if t < 0.5 => 2.0 * t * t,
        Easing::EaseInOut => 1.0 - (2.0 - 2.0 * t).powi(2) / 2.0,
        Easing::EaseInOutCubic if t < 0.5 => 4.0 * t.powi(3),
        Easing::EaseInOutCubic => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
    }
}

/// Interpolate from `start` to `end` along `easing`.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}
