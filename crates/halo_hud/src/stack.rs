//! The overlay stack state machine
//!
//! `HudStack` is the pure, synchronous model underneath [`HudManager`]:
//! an insertion-ordered map of entries plus the "current animation" source.
//! It knows nothing about timers or listeners; the manager layers those on.
//!
//! [`HudManager`]: crate::HudManager

use halo_animation::Animation;
use halo_core::Color;
use indexmap::IndexMap;

use crate::config::HudDefaults;
use crate::entry::HudEntry;
use crate::id::HudId;

/// Ordered collection of live overlay entries
///
/// Insertion order is z-order: the last entry is the top of the stack.
pub struct HudStack<C> {
    defaults: HudDefaults,
    entries: IndexMap<HudId, HudEntry<C>>,
    /// Animation of the most recent push or removal
    current_animation: Animation,
    next_serial: u64,
}

impl<C> HudStack<C> {
    pub fn new(defaults: HudDefaults) -> Self {
        let current_animation = defaults.animation;
        Self {
            defaults,
            entries: IndexMap::new(),
            current_animation,
            next_serial: 1,
        }
    }

    pub fn defaults(&self) -> &HudDefaults {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate visibility: true iff at least one entry is live
    pub fn is_presented(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn contains(&self, id: &HudId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &HudId) -> Option<&HudEntry<C>> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &HudId) -> Option<&mut HudEntry<C>> {
        self.entries.get_mut(id)
    }

    /// Entries bottom to top
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HudEntry<C>> + ExactSizeIterator {
        self.entries.values()
    }

    pub fn ids(&self) -> Vec<HudId> {
        self.entries.keys().cloned().collect()
    }

    /// Most recently shown entry that is still live
    pub fn top(&self) -> Option<&HudEntry<C>> {
        self.entries.last().map(|(_, e)| e)
    }

    /// Push an entry, making its animation current
    ///
    /// An entry whose id is already live replaces the old one in place: it
    /// keeps the old stacking position and the displaced entry is returned.
    pub fn push(&mut self, mut entry: HudEntry<C>) -> Option<HudEntry<C>> {
        entry.serial = self.next_serial;
        self.next_serial += 1;
        self.current_animation = entry.animation();
        let id = entry.id().clone();
        self.entries.insert(id, entry)
    }

    /// Remove one entry, making its animation current
    ///
    /// Unknown ids are ignored and leave the current animation untouched.
    pub fn remove(&mut self, id: &HudId) -> Option<HudEntry<C>> {
        let removed = self.entries.shift_remove(id)?;
        self.current_animation = removed.animation();
        Some(removed)
    }

    /// Remove every entry in one step
    ///
    /// The current animation becomes the sole entry's animation when exactly
    /// one was live, and the default animation otherwise.
    pub fn clear(&mut self) -> Vec<HudEntry<C>> {
        let removed: Vec<_> = self.entries.drain(..).map(|(_, e)| e).collect();
        self.current_animation = match removed.as_slice() {
            [only] => only.animation(),
            _ => self.defaults.animation,
        };
        removed
    }

    pub fn current_background_color(&self) -> Color {
        self.top()
            .and_then(|e| e.background_color())
            .unwrap_or(self.defaults.background_color)
    }

    pub fn current_interactive_hide(&self) -> bool {
        self.top()
            .and_then(|e| e.interactive_hide())
            .unwrap_or(self.defaults.interactive_hide)
    }

    pub fn current_animation(&self) -> Animation {
        self.current_animation
    }
}

impl<C> std::fmt::Debug for HudStack<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HudStack")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .field("current_animation", &self.current_animation)
            .finish()
    }
}
