//! Manager-level defaults

use halo_animation::Animation;
use halo_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Defaults applied when the top entry does not override them
///
/// Fixed for the lifetime of a manager. Can be written by hand or loaded
/// from TOML; missing keys fall back to [`HudDefaults::default`]:
///
/// ```rust
/// use halo_hud::HudDefaults;
///
/// let defaults = HudDefaults::from_toml_str(r#"
///     interactive_hide = true
///     background_color = { r = 0.0, g = 0.0, b = 0.0, a = 0.3 }
/// "#).unwrap();
/// assert!(defaults.interactive_hide);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudDefaults {
    /// Shared background behind every entry
    pub background_color: Color,
    /// Whether tapping the background dismisses everything
    pub interactive_hide: bool,
    /// Animation for the background's appear/disappear edge
    pub animation: Animation,
}

impl Default for HudDefaults {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK.with_alpha(0.5),
            interactive_hide: false,
            animation: Animation::linear(100),
        }
    }
}

impl HudDefaults {
    /// Parse defaults from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn interactive_hide(mut self, enabled: bool) -> Self {
        self.interactive_hide = enabled;
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }
}
