//! Toast presets
//!
//! A toast is an ordinary stack entry with a transparent background, placed
//! at one of three positions and either dismissed on a timer or held up as a
//! loading indicator.

use std::time::Duration;

use halo_animation::Transition;
use halo_core::{Alignment, Color, Edge};

use crate::entry::HudOptions;
use crate::id::HudId;
use crate::manager::HudManager;

/// Where a toast sits on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

impl ToastPosition {
    pub fn alignment(self) -> Alignment {
        match self {
            ToastPosition::Top => Alignment::Top,
            ToastPosition::Center => Alignment::Center,
            ToastPosition::Bottom => Alignment::Bottom,
        }
    }

    /// Edge toasts slide in from their edge, centered ones pop
    pub fn transition(self) -> Transition {
        match self {
            ToastPosition::Top => Transition::pop().combined(Transition::move_from(Edge::Top)),
            ToastPosition::Center => Transition::pop(),
            ToastPosition::Bottom => {
                Transition::pop().combined(Transition::move_from(Edge::Bottom))
            }
        }
    }
}

/// How long a toast stays up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStyle {
    /// Dismissed after the delay
    Timed(Duration),
    /// Stays until hidden
    Loading,
}

impl Default for ToastStyle {
    fn default() -> Self {
        ToastStyle::Timed(Duration::from_secs(2))
    }
}

/// Options for a toast at `position` with `style`
///
/// Toasts never dismiss on a background tap, so a toast shown over a
/// blocking entry cannot make that entry tappable away.
pub fn toast_options(position: ToastPosition, style: ToastStyle) -> HudOptions {
    let options = HudOptions::new()
        .alignment(position.alignment())
        .transition(position.transition())
        .background_color(Color::TRANSPARENT)
        .interactive_hide(false);

    match style {
        ToastStyle::Timed(delay) => options.auto_dismiss(delay),
        ToastStyle::Loading => options,
    }
}

impl<C: 'static> HudManager<C> {
    /// Show a toast and return its id
    ///
    /// Hide a [`ToastStyle::Loading`] toast with [`hide`](Self::hide) once
    /// the work it covers is done.
    pub fn toast<F>(&self, position: ToastPosition, style: ToastStyle, content: F) -> HudId
    where
        F: FnOnce() -> C,
    {
        self.show(toast_options(position, style), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HudDefaults;
    use halo_animation::{FrameScheduler, TransitionEffect};

    #[test]
    fn test_position_layout() {
        assert_eq!(ToastPosition::Top.alignment(), Alignment::Top);
        assert_eq!(ToastPosition::default().alignment(), Alignment::Center);
        assert_eq!(ToastPosition::Center.transition(), Transition::pop());

        let bottom = ToastPosition::Bottom.transition();
        assert!(bottom
            .effects()
            .contains(&TransitionEffect::Move { edge: Edge::Bottom }));
        assert!(bottom.effects().contains(&TransitionEffect::Opacity));
    }

    #[test]
    fn test_timed_options() {
        let opts = toast_options(ToastPosition::Top, ToastStyle::default());
        assert_eq!(opts.background_color, Some(Color::TRANSPARENT));
        assert_eq!(opts.interactive_hide, Some(false));
        assert_eq!(opts.auto_dismiss, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_loading_options_block_taps() {
        let opts = toast_options(ToastPosition::Center, ToastStyle::Loading);
        assert_eq!(opts.interactive_hide, Some(false));
        assert!(opts.auto_dismiss.is_none());
    }

    #[test]
    fn test_timed_toast_dismisses_itself() {
        let scheduler = FrameScheduler::new();
        let hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        let id = hud.toast(
            ToastPosition::Bottom,
            ToastStyle::Timed(Duration::from_millis(300)),
            || "Saved",
        );
        assert!(hud.contains(&id));
        assert!(hud.current_background_color().is_transparent());

        scheduler.advance(Duration::from_millis(300));
        assert!(!hud.contains(&id));
        assert!(!hud.is_presented());
    }

    #[test]
    fn test_loading_toast_survives_taps() {
        let scheduler = FrameScheduler::new();
        let hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        let id = hud.toast(ToastPosition::Center, ToastStyle::Loading, || "Syncing");
        assert!(!hud.handle_background_tap());
        scheduler.advance(Duration::from_secs(60));
        assert!(hud.contains(&id));

        assert!(hud.hide(&id));
        assert!(hud.is_empty());
    }

    #[test]
    fn test_timed_toast_over_spinner_keeps_spinner_blocking() {
        let hud = HudManager::new(HudDefaults::default().interactive_hide(true));

        let spinner = hud.toast(ToastPosition::Center, ToastStyle::Loading, || "Loading");
        hud.toast(ToastPosition::Top, ToastStyle::default(), || "Copied");

        assert!(!hud.handle_background_tap());
        assert!(hud.contains(&spinner));
        assert_eq!(hud.len(), 2);
    }
}
