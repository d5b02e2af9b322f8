//! Animation descriptors
//!
//! An [`Animation`] is a curve plus timing. Halo never drives frames itself;
//! the descriptor travels with overlay state changes so the host knows how to
//! animate them, and [`Animation::progress`] is there for hosts that want to
//! sample it directly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// Curve and timing for a state change
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub easing: Easing,
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
}

impl Animation {
    pub fn new(easing: Easing, duration_ms: u32) -> Self {
        Self {
            easing,
            duration_ms,
            delay_ms: 0,
        }
    }

    pub fn linear(duration_ms: u32) -> Self {
        Self::new(Easing::Linear, duration_ms)
    }

    pub fn ease_in(duration_ms: u32) -> Self {
        Self::new(Easing::EaseIn, duration_ms)
    }

    pub fn ease_out(duration_ms: u32) -> Self {
        Self::new(Easing::EaseOut, duration_ms)
    }

    pub fn ease_in_out(duration_ms: u32) -> Self {
        Self::new(Easing::EaseInOut, duration_ms)
    }

    /// Spring animation lasting until the spring settles
    pub fn spring(config: SpringConfig) -> Self {
        Self::new(Easing::Spring(config), config.settle_duration_ms())
    }

    /// The general-purpose animation used when a caller does not pick one
    pub fn standard() -> Self {
        Self::ease_in_out(350)
    }

    /// Instant change
    pub fn none() -> Self {
        Self::linear(0)
    }

    /// Delay the start of this animation
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }

    /// Delay plus duration
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.delay_ms as u64 + self.duration_ms as u64)
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }

    /// Eased progress in `0.0..=1.0` after `elapsed` since the change began
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let elapsed_ms = elapsed.as_secs_f32() * 1000.0;
        let active_ms = elapsed_ms - self.delay_ms as f32;
        if active_ms < 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        let t = (active_ms / self.duration_ms as f32).clamp(0.0, 1.0);
        self.easing.apply(t, self.duration_ms as f32 / 1000.0)
    }

    /// Whether the animation has run to completion after `elapsed`
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::standard()
    }
}
