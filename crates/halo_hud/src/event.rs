//! Change notifications

use halo_animation::Animation;

use crate::id::HudId;

/// Something observable happened to the stack
///
/// `Presented` and `Dismissed` fire exactly once per emptiness edge; the
/// entry events fire once per mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum HudEvent {
    /// The stack went from empty to non-empty
    Presented {
        /// Animation for the background fade-in (always the default)
        animation: Animation,
    },
    /// The stack went from non-empty to empty
    Dismissed {
        /// Animation for the background fade-out
        animation: Animation,
    },
    /// A new entry was pushed
    EntryShown { id: HudId },
    /// A live entry was swapped for a new one with the same id
    EntryReplaced { id: HudId },
    /// One entry was removed
    EntryHidden { id: HudId },
    /// `hide_all` removed `count` entries at once
    Cleared { count: usize },
}

impl HudEvent {
    /// Whether this event changes aggregate visibility
    pub fn is_visibility_edge(&self) -> bool {
        matches!(self, HudEvent::Presented { .. } | HudEvent::Dismissed { .. })
    }
}
