//! Spring curves
//!
//! A [`SpringConfig`] describes a damped spring. Overlay animations only need
//! normalized progress, so [`SpringConfig::sample`] evaluates the closed-form
//! response of a unit spring released at 0 with target 1.

use serde::{Deserialize, Serialize};

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    #[serde(default = "unit_mass")]
    pub mass: f32,
}

fn unit_mass() -> f32 {
    1.0
}

/// Remaining amplitude at which a spring counts as settled
const SETTLE_EPSILON: f32 = 0.001;

/// Upper bound on settle time, for nearly undamped springs
const MAX_SETTLE_SECS: f32 = 10.0;

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A gentle, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with visible overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A very stiff spring with minimal oscillation
    pub fn snappy() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping relative to critical (below 1 oscillates)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Underdamped springs overshoot and oscillate before settling
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    fn is_degenerate(&self) -> bool {
        !(self.stiffness > 0.0 && self.mass > 0.0 && self.damping > 0.0)
    }

    /// Exponential decay rate of the slowest mode
    fn decay_rate(&self) -> f32 {
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();
        if zeta <= 1.0 {
            zeta * omega
        } else {
            omega * (zeta - (zeta * zeta - 1.0).sqrt())
        }
    }

    /// Time until the remaining amplitude drops below 0.1%, in seconds
    pub fn settle_secs(&self) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((1.0 / SETTLE_EPSILON).ln() / self.decay_rate()).min(MAX_SETTLE_SECS)
    }

    /// Time until a unit spring settles, in milliseconds
    pub fn settle_duration_ms(&self) -> u32 {
        (self.settle_secs() * 1000.0).round() as u32
    }

    /// Normalized progress of a unit spring (0 → 1) after `t` seconds
    ///
    /// Returns exactly 1.0 once the spring has settled.
    pub fn sample(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if self.is_degenerate() || t >= self.settle_secs() {
            return 1.0;
        }

        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-4 {
            1.0 - (-omega * t).exp() * (1.0 + omega * t)
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope
                * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            1.0 + (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}
