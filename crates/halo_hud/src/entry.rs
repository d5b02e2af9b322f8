//! Overlay entries and the options that build them

use std::time::Duration;

use halo_animation::{Animation, TimerId, Transition};
use halo_core::{Alignment, Color, Edges};
use serde::{Deserialize, Serialize};

use crate::id::HudId;

// =============================================================================
// HudOptions
// =============================================================================

/// Per-entry configuration passed to `show`
///
/// Unset overrides inherit the manager defaults while the entry is on top.
#[derive(Clone, Debug, PartialEq)]
pub struct HudOptions {
    pub id: Option<HudId>,
    pub animation: Animation,
    pub transition: Transition,
    pub alignment: Alignment,
    pub ignores_safe_area: Edges,
    pub background_color: Option<Color>,
    pub interactive_hide: Option<bool>,
    pub auto_dismiss: Option<Duration>,
}

impl Default for HudOptions {
    fn default() -> Self {
        Self {
            id: None,
            animation: Animation::standard(),
            transition: Transition::opacity(),
            alignment: Alignment::Center,
            ignores_safe_area: Edges::NONE,
            background_color: None,
            interactive_hide: None,
            auto_dismiss: None,
        }
    }
}

impl HudOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with a caller-chosen id
    pub fn with_id(id: impl Into<HudId>) -> Self {
        Self::default().id(id)
    }

    pub fn id(mut self, id: impl Into<HudId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn ignores_safe_area(mut self, edges: Edges) -> Self {
        self.ignores_safe_area = edges;
        self
    }

    /// Override the shared background while this entry is on top
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Override tap-to-dismiss while this entry is on top
    pub fn interactive_hide(mut self, enabled: bool) -> Self {
        self.interactive_hide = Some(enabled);
        self
    }

    /// Hide this entry automatically after `delay`
    pub fn auto_dismiss(mut self, delay: Duration) -> Self {
        self.auto_dismiss = Some(delay);
        self
    }

    /// Apply every field of a style
    pub fn style(mut self, style: &HudStyle) -> Self {
        self.background_color = Some(style.background);
        self.interactive_hide = Some(style.interactive_hide);
        self.alignment = style.alignment;
        self.transition = style.transition.clone();
        self.auto_dismiss = style.auto_dismiss();
        self
    }
}

// =============================================================================
// HudStyle
// =============================================================================

/// A reusable look-and-behavior bundle for entries
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudStyle {
    pub background: Color,
    pub interactive_hide: bool,
    pub alignment: Alignment,
    pub transition: Transition,
    pub auto_dismiss_ms: Option<u32>,
}

impl Default for HudStyle {
    /// Dimmed, tap-to-dismiss, centered pop-in that stays until hidden
    fn default() -> Self {
        Self {
            background: Color::BLACK.with_alpha(0.6),
            interactive_hide: true,
            alignment: Alignment::Center,
            transition: Transition::pop(),
            auto_dismiss_ms: None,
        }
    }
}

impl HudStyle {
    /// Blocks taps and can only be hidden programmatically
    pub fn blocking() -> Self {
        Self {
            interactive_hide: false,
            ..Self::default()
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn interactive_hide(mut self, enabled: bool) -> Self {
        self.interactive_hide = enabled;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn dismiss_after_ms(mut self, ms: u32) -> Self {
        self.auto_dismiss_ms = Some(ms);
        self
    }

    pub fn auto_dismiss(&self) -> Option<Duration> {
        self.auto_dismiss_ms.map(|ms| Duration::from_millis(ms as u64))
    }
}

// =============================================================================
// HudEntry
// =============================================================================

/// One live overlay on the stack
///
/// The content is opaque to the manager: it is stored, lent to the host for
/// rendering, and dropped when the entry leaves the stack.
pub struct HudEntry<C> {
    id: HudId,
    content: C,
    animation: Animation,
    transition: Transition,
    alignment: Alignment,
    ignores_safe_area: Edges,
    background_color: Option<Color>,
    interactive_hide: Option<bool>,
    auto_dismiss: Option<Duration>,
    /// Distinguishes this entry from a later one that reuses its id
    pub(crate) serial: u64,
    pub(crate) timer: Option<TimerId>,
}

impl<C> HudEntry<C> {
    pub(crate) fn new(id: HudId, content: C, options: HudOptions) -> Self {
        Self {
            id,
            content,
            animation: options.animation,
            transition: options.transition,
            alignment: options.alignment,
            ignores_safe_area: options.ignores_safe_area,
            background_color: options.background_color,
            interactive_hide: options.interactive_hide,
            auto_dismiss: options.auto_dismiss,
            serial: 0,
            timer: None,
        }
    }

    pub fn id(&self) -> &HudId {
        &self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn ignores_safe_area(&self) -> Edges {
        self.ignores_safe_area
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn interactive_hide(&self) -> Option<bool> {
        self.interactive_hide
    }

    pub fn auto_dismiss(&self) -> Option<Duration> {
        self.auto_dismiss
    }

    pub fn into_content(self) -> C {
        self.content
    }
}

impl<C> std::fmt::Debug for HudEntry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HudEntry")
            .field("id", &self.id)
            .field("animation", &self.animation)
            .field("transition", &self.transition)
            .field("background_color", &self.background_color)
            .field("interactive_hide", &self.interactive_hide)
            .field("auto_dismiss", &self.auto_dismiss)
            .finish_non_exhaustive()
    }
}
