//! Easing curves
//!
//! Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0`. Inputs are clamped to
//! `[0, 1]`; NaN is treated as `0.0`.

use serde::{Deserialize, Serialize};

/// Easing function applied to linear progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Quadratic first half, cubic second half
    ///
    /// Continuous at 0.5 but not point-symmetric around it.
    #[default]
    EaseInQuadOutCubic,
}

impl Easing {
    /// Apply the easing curve to `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = clamp_unit(t);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuadOutCubic => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Whether `apply(0.5 - d) + apply(0.5 + d) == 1` holds for all `d`
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            Easing::Linear | Easing::EaseInOutQuad | Easing::EaseInOutCubic
        )
    }
}

/// Clamp to `[0, 1]`, mapping NaN to `0.0`
pub(crate) fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}
