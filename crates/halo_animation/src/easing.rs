//! Easing curves

use serde::{Deserialize, Serialize};

use crate::spring::SpringConfig;

/// Timing curve applied to normalized animation time
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// Damped spring; the animation's duration is the time window the
    /// spring is sampled over
    Spring(SpringConfig),
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` onto the curve
    ///
    /// `duration_secs` only matters for springs, which are sampled in real
    /// time rather than normalized time.
    pub fn apply(&self, t: f32, duration_secs: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k * k / 2.0
                }
            }
            Easing::Spring(config) => {
                if t >= 1.0 {
                    1.0
                } else {
                    config.sample(t * duration_secs)
                }
            }
        }
    }
}
