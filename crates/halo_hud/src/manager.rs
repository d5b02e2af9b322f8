//! HUD Manager - stack of simultaneously visible overlays
//!
//! The manager owns an ordered stack of overlay entries, derives aggregate
//! visibility from it, and tells listeners and hosts what changed.
//!
//! # Architecture
//!
//! - **HudStack**: Pure ordered state (entries, current animation)
//! - **Visibility**: `is_presented` is read from the stack; listeners hear
//!   only real edges
//! - **Events**: Queued per mutation and delivered in order once the stack
//!   is final, after internal borrows are released
//! - **Auto-dismiss**: Optional one-shot timers on a [`FrameScheduler`]
//!
//! The manager is confined to the UI thread. Handles are cheap to clone and
//! all point at the same stack; share one per presentation scope through a
//! [`Context`].
//!
//! # Example
//!
//! ```rust
//! use halo_hud::{HudDefaults, HudManager, HudOptions};
//!
//! let hud: HudManager<&str> = HudManager::new(HudDefaults::default());
//!
//! hud.show(HudOptions::with_id("a"), || "first");
//! hud.show(HudOptions::with_id("b").interactive_hide(true), || "second");
//! assert_eq!(hud.len(), 2);
//! assert!(hud.current_interactive_hide());
//!
//! hud.hide("a");
//! hud.hide_all();
//! assert!(!hud.is_presented());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use halo_animation::{Animation, FrameScheduler};
use halo_core::{Color, Context, Emitter, Observable, SubscriptionId};

use crate::config::HudDefaults;
use crate::entry::{HudEntry, HudOptions};
use crate::error::{HudError, Result};
use crate::event::HudEvent;
use crate::host::{BackgroundLayer, ContentLayer, PresentationHost};
use crate::id::HudId;
use crate::stack::HudStack;

struct Shared<C> {
    stack: RefCell<HudStack<C>>,
    /// Visibility as of the last queued edge
    edge: Cell<bool>,
    presented: Observable<bool>,
    events: Emitter<HudEvent>,
    pending: RefCell<VecDeque<HudEvent>>,
    dispatching: Cell<bool>,
    /// Animation used for the most recent visibility edge
    fade_animation: Cell<Animation>,
    scheduler: Option<FrameScheduler>,
}

/// Handle to a HUD stack (cheap to clone, UI-thread only)
pub struct HudManager<C: 'static> {
    shared: Rc<Shared<C>>,
}

impl<C: 'static> Clone for HudManager<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C: 'static> HudManager<C> {
    /// Create a manager without a timer source
    ///
    /// Entries that ask for auto-dismiss stay until hidden.
    pub fn new(defaults: HudDefaults) -> Self {
        Self::build(defaults, None)
    }

    /// Create a manager whose auto-dismiss timers run on `scheduler`
    pub fn with_scheduler(defaults: HudDefaults, scheduler: FrameScheduler) -> Self {
        Self::build(defaults, Some(scheduler))
    }

    fn build(defaults: HudDefaults, scheduler: Option<FrameScheduler>) -> Self {
        let fade_animation = Cell::new(defaults.animation);
        Self {
            shared: Rc::new(Shared {
                stack: RefCell::new(HudStack::new(defaults)),
                edge: Cell::new(false),
                presented: Observable::new(false),
                events: Emitter::new(),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                fade_animation,
                scheduler,
            }),
        }
    }

    // =========================================================================
    // Ambient access
    // =========================================================================

    /// Make this manager reachable from `ctx` and its descendants
    pub fn install(&self, ctx: &Context) {
        ctx.provide(self.clone());
    }

    /// Nearest manager provided in `ctx` or a parent scope
    pub fn from_context(ctx: &Context) -> Result<Self> {
        Ok(ctx.require::<Self>()?)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Push a new overlay and return its id
    ///
    /// `content` runs once, right away. If `options.id` is already live the
    /// old entry is replaced in place: same stacking position, new content
    /// and configuration, and its pending auto-dismiss is cancelled.
    pub fn show<F>(&self, options: HudOptions, content: F) -> HudId
    where
        F: FnOnce() -> C,
    {
        let content = content();
        let id = options.id.clone().unwrap_or_else(HudId::unique);
        self.push(id, options, content)
    }

    /// Like [`show`](Self::show) but refuses ids that are already live
    ///
    /// On rejection the stack is untouched and `content` is never run.
    pub fn try_show<F>(&self, options: HudOptions, content: F) -> Result<HudId>
    where
        F: FnOnce() -> C,
    {
        let id = options.id.clone().unwrap_or_else(HudId::unique);
        if self.contains(&id) {
            tracing::warn!(%id, "HudManager::try_show - id already presented");
            return Err(HudError::DuplicateId(id));
        }
        let content = content();
        Ok(self.push(id, options, content))
    }

    fn push(&self, id: HudId, options: HudOptions, content: C) -> HudId {
        let entry = HudEntry::new(id.clone(), content, options);
        let displaced = self.shared.stack.borrow_mut().push(entry);

        tracing::debug!(
            %id,
            replaced = displaced.is_some(),
            count = self.len(),
            "HudManager::show"
        );

        let replaced = displaced.is_some();
        if let Some(old) = displaced {
            self.cancel_timer(&old);
        }
        self.arm_auto_dismiss(&id);

        self.queue(if replaced {
            HudEvent::EntryReplaced { id: id.clone() }
        } else {
            HudEvent::EntryShown { id: id.clone() }
        });
        self.sync_presented();
        self.dispatch();
        id
    }

    /// Remove the entry with `id`
    ///
    /// Unknown ids are a silent no-op, so a late timer or a double hide is
    /// harmless. Returns whether an entry was removed.
    pub fn hide(&self, id: impl Into<HudId>) -> bool {
        let id = id.into();
        self.remove(&id, None)
    }

    /// Remove every entry in a single update
    ///
    /// Returns the number of entries removed.
    pub fn hide_all(&self) -> usize {
        let removed = self.shared.stack.borrow_mut().clear();
        let count = removed.len();
        for entry in &removed {
            self.cancel_timer(entry);
        }
        drop(removed);

        if count == 0 {
            return 0;
        }

        tracing::debug!(count, "HudManager::hide_all");
        self.queue(HudEvent::Cleared { count });
        self.sync_presented();
        self.dispatch();
        count
    }

    /// Forward a tap on the shared background
    ///
    /// Dismisses everything iff the current interactive-hide policy allows
    /// it at the moment of the tap. Returns whether anything was dismissed.
    pub fn handle_background_tap(&self) -> bool {
        if !self.current_interactive_hide() {
            tracing::trace!("HudManager::handle_background_tap - ignored");
            return false;
        }
        self.hide_all() > 0
    }

    fn remove(&self, id: &HudId, serial: Option<u64>) -> bool {
        let removed = {
            let mut stack = self.shared.stack.borrow_mut();
            if let Some(serial) = serial {
                if stack.get(id).map(|e| e.serial) != Some(serial) {
                    return false;
                }
            }
            stack.remove(id)
        };

        let Some(entry) = removed else {
            tracing::trace!(%id, "HudManager::hide - no such entry");
            return false;
        };
        self.cancel_timer(&entry);
        drop(entry);

        tracing::debug!(%id, count = self.len(), "HudManager::hide");
        self.queue(HudEvent::EntryHidden { id: id.clone() });
        self.sync_presented();
        self.dispatch();
        true
    }

    // =========================================================================
    // Auto-dismiss
    // =========================================================================

    fn arm_auto_dismiss(&self, id: &HudId) {
        let armed = {
            let stack = self.shared.stack.borrow();
            stack
                .get(id)
                .and_then(|e| e.auto_dismiss().map(|delay| (delay, e.serial)))
        };
        let Some((delay, serial)) = armed else {
            return;
        };

        let Some(scheduler) = &self.shared.scheduler else {
            tracing::warn!(
                %id,
                ?delay,
                "auto-dismiss requested but the manager has no scheduler"
            );
            return;
        };

        let weak: Weak<Shared<C>> = Rc::downgrade(&self.shared);
        let timer_id = id.clone();
        let timer = scheduler.schedule(delay, move || {
            if let Some(shared) = weak.upgrade() {
                let manager = HudManager { shared };
                tracing::trace!(id = %timer_id, "auto-dismiss fired");
                manager.remove(&timer_id, Some(serial));
            }
        });

        if let Some(entry) = self.shared.stack.borrow_mut().get_mut(id) {
            entry.timer = Some(timer);
        }
    }

    fn cancel_timer(&self, entry: &HudEntry<C>) {
        if let (Some(scheduler), Some(timer)) = (&self.shared.scheduler, entry.timer) {
            scheduler.cancel(timer);
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Queue a visibility edge if the stack's emptiness flipped
    fn sync_presented(&self) {
        let (presented, current) = {
            let stack = self.shared.stack.borrow();
            (stack.is_presented(), stack.current_animation())
        };
        if self.shared.edge.replace(presented) == presented {
            return;
        }

        let event = if presented {
            let animation = self.defaults().animation;
            self.shared.fade_animation.set(animation);
            HudEvent::Presented { animation }
        } else {
            self.shared.fade_animation.set(current);
            HudEvent::Dismissed { animation: current }
        };
        tracing::debug!(presented, "HudManager visibility changed");
        self.queue(event);
    }

    fn queue(&self, event: HudEvent) {
        self.shared.pending.borrow_mut().push_back(event);
    }

    /// Deliver queued events in order
    ///
    /// A listener that mutates the manager only queues more events; the
    /// outermost call keeps draining until the queue is empty.
    fn dispatch(&self) {
        if self.shared.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard(&self.shared.dispatching);

        loop {
            let next = self.shared.pending.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            match event {
                HudEvent::Presented { .. } => {
                    self.shared.presented.set(true);
                }
                HudEvent::Dismissed { .. } => {
                    self.shared.presented.set(false);
                }
                _ => {}
            }
            self.shared.events.emit(&event);
        }
    }

    /// Listen to every stack change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&HudEvent) + 'static,
    {
        self.shared.events.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.events.unsubscribe(id)
    }

    /// Listen only to aggregate visibility flips
    pub fn on_presented_change<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&bool) + 'static,
    {
        self.shared.presented.subscribe(listener)
    }

    pub fn unsubscribe_presented(&self, id: SubscriptionId) -> bool {
        self.shared.presented.unsubscribe(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True iff at least one entry is live
    pub fn is_presented(&self) -> bool {
        self.shared.stack.borrow().is_presented()
    }

    pub fn len(&self) -> usize {
        self.shared.stack.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.stack.borrow().is_empty()
    }

    pub fn contains(&self, id: &HudId) -> bool {
        self.shared.stack.borrow().contains(id)
    }

    /// Live ids, bottom to top
    pub fn ids(&self) -> Vec<HudId> {
        self.shared.stack.borrow().ids()
    }

    pub fn defaults(&self) -> HudDefaults {
        self.shared.stack.borrow().defaults().clone()
    }

    pub fn current_background_color(&self) -> Color {
        self.shared.stack.borrow().current_background_color()
    }

    pub fn current_interactive_hide(&self) -> bool {
        self.shared.stack.borrow().current_interactive_hide()
    }

    pub fn current_animation(&self) -> Animation {
        self.shared.stack.borrow().current_animation()
    }

    pub fn scheduler(&self) -> Option<&FrameScheduler> {
        self.shared.scheduler.as_ref()
    }

    /// Read the stack directly
    pub fn with_stack<R>(&self, f: impl FnOnce(&HudStack<C>) -> R) -> R {
        f(&self.shared.stack.borrow())
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Describe the current stack to `host`
    ///
    /// # Panics
    ///
    /// Panics if the host mutates this manager from inside a callback.
    pub fn present<H>(&self, host: &mut H)
    where
        H: PresentationHost<C> + ?Sized,
    {
        let stack = self.shared.stack.borrow();
        host.background(BackgroundLayer {
            visible: stack.is_presented(),
            color: stack.current_background_color(),
            interactive_hide: stack.current_interactive_hide(),
            animation: stack.current_animation(),
            fade_animation: self.shared.fade_animation.get(),
        });

        for (z_index, entry) in stack.entries().enumerate() {
            host.content(ContentLayer {
                id: entry.id(),
                content: entry.content(),
                transition: entry.transition(),
                animation: entry.animation(),
                alignment: entry.alignment(),
                ignores_safe_area: entry.ignores_safe_area(),
                z_index,
            });
        }
    }
}

/// Clears the dispatching flag even if a listener panics
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Nearest `HudManager<C>` visible from `ctx`, if any
pub fn use_hud<C: 'static>(ctx: &Context) -> Option<HudManager<C>> {
    ctx.get::<HudManager<C>>()
}

impl<C: 'static> std::fmt::Debug for HudManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HudManager")
            .field("stack", &*self.shared.stack.borrow())
            .field("presented", &self.is_presented())
            .field("scheduler", &self.shared.scheduler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_animation::Transition;
    use halo_core::Alignment;
    use proptest::prelude::*;
    use std::time::Duration;

    type Hud = HudManager<String>;

    fn hud() -> Hud {
        HudManager::new(HudDefaults::default())
    }

    fn show(hud: &Hud, id: &str) -> HudId {
        hud.show(HudOptions::with_id(id), || id.to_string())
    }

    fn record(hud: &Hud) -> Rc<RefCell<Vec<HudEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        hud.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    fn assert_invariant(hud: &Hud) {
        assert_eq!(hud.is_presented(), hud.len() > 0);
        let ids = hud.ids();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate id {id}");
        }
    }

    #[test]
    fn test_presented_tracks_emptiness_for_mixed_sequence() {
        let hud = hud();
        assert_invariant(&hud);

        show(&hud, "a");
        assert_invariant(&hud);
        show(&hud, "b");
        assert_invariant(&hud);
        hud.hide("zzz");
        assert_invariant(&hud);
        hud.hide("a");
        assert_invariant(&hud);
        hud.hide("b");
        assert_invariant(&hud);
        show(&hud, "c");
        hud.show(HudOptions::new(), || "anon".into());
        assert_invariant(&hud);
        hud.hide_all();
        assert_invariant(&hud);
        hud.hide_all();
        assert_invariant(&hud);
    }

    #[test]
    fn test_show_then_hide_round_trips() {
        let hud = hud();
        show(&hud, "base");
        let before = hud.ids();

        let id = hud.show(HudOptions::new(), || "temp".into());
        assert_eq!(hud.len(), 2);
        assert!(hud.hide(&id));

        assert_eq!(hud.ids(), before);
        assert!(hud.is_presented());
    }

    #[test]
    fn test_hide_unknown_id_is_noop() {
        let hud = hud();
        show(&hud, "a");
        let events = record(&hud);

        assert!(!hud.hide("missing"));
        assert!(!hud.hide(99));

        assert_eq!(hud.ids(), vec![HudId::from("a")]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_hide_all_empties_any_size() {
        for n in [0usize, 1, 5] {
            let hud = hud();
            for i in 0..n {
                hud.show(HudOptions::new(), move || format!("entry {i}"));
            }
            assert_eq!(hud.hide_all(), n);
            assert_eq!(hud.len(), 0);
            assert!(!hud.is_presented());
        }
    }

    #[test]
    fn test_current_overrides_follow_top_entry() {
        let defaults = HudDefaults::default();
        let hud = hud();

        hud.show(
            HudOptions::with_id("a")
                .background_color(Color::RED)
                .interactive_hide(true),
            || "a".into(),
        );
        assert_eq!(hud.current_background_color(), Color::RED);
        assert!(hud.current_interactive_hide());

        show(&hud, "b");
        assert_eq!(hud.current_background_color(), defaults.background_color);
        assert!(!hud.current_interactive_hide());

        hud.hide("b");
        assert_eq!(hud.current_background_color(), Color::RED);

        hud.hide("a");
        assert_eq!(hud.current_background_color(), defaults.background_color);
        assert_eq!(hud.current_interactive_hide(), defaults.interactive_hide);
    }

    #[test]
    fn test_two_entry_scenario() {
        let hud = HudManager::new(
            HudDefaults::default()
                .background_color(Color::BLACK.with_alpha(0.5))
                .interactive_hide(false),
        );

        hud.show(HudOptions::with_id("a"), || "a".to_string());
        assert!(hud.is_presented());
        assert_eq!(hud.len(), 1);

        hud.show(HudOptions::with_id("b"), || "b".to_string());
        assert_eq!(hud.len(), 2);
        // b has no override, so the default applies
        assert!(!hud.current_interactive_hide());

        hud.hide("a");
        assert_eq!(hud.ids(), vec![HudId::from("b")]);

        hud.hide_all();
        assert_eq!(hud.len(), 0);
        assert!(!hud.is_presented());
    }

    #[test]
    fn test_auto_dismiss_after_clock_advances() {
        let scheduler = FrameScheduler::new();
        let hud: Hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        hud.show(
            HudOptions::with_id("toast").auto_dismiss(Duration::from_millis(10)),
            || "toast".into(),
        );
        assert!(hud.contains(&HudId::from("toast")));

        scheduler.advance(Duration::from_millis(5));
        assert!(hud.contains(&HudId::from("toast")));

        scheduler.advance(Duration::from_millis(5));
        assert!(!hud.contains(&HudId::from("toast")));
        assert!(!hud.is_presented());
    }

    #[test]
    fn test_duplicate_show_replaces_in_place() {
        let hud = hud();
        hud.show(HudOptions::with_id("x"), || "old".into());
        show(&hud, "y");
        let events = record(&hud);

        hud.show(HudOptions::with_id("x").background_color(Color::BLUE), || {
            "new".into()
        });

        assert_eq!(hud.ids(), vec![HudId::from("x"), HudId::from("y")]);
        let content = hud.with_stack(|s| s.get(&HudId::from("x")).map(|e| e.content().clone()));
        assert_eq!(content.as_deref(), Some("new"));
        assert_eq!(
            *events.borrow(),
            vec![HudEvent::EntryReplaced {
                id: HudId::from("x")
            }]
        );
    }

    #[test]
    fn test_try_show_rejects_duplicate() {
        let hud = hud();
        hud.show(HudOptions::with_id("x"), || "old".into());

        let ran = Cell::new(false);
        let err = hud
            .try_show(HudOptions::with_id("x"), || {
                ran.set(true);
                "new".into()
            })
            .unwrap_err();

        assert!(matches!(err, HudError::DuplicateId(ref id) if *id == HudId::from("x")));
        assert!(!ran.get());
        assert_eq!(hud.len(), 1);
        let content = hud.with_stack(|s| s.top().map(|e| e.content().clone()));
        assert_eq!(content.as_deref(), Some("old"));

        assert!(hud.try_show(HudOptions::with_id("y"), || "y".into()).is_ok());
        assert_eq!(hud.len(), 2);
    }

    #[test]
    fn test_replacing_cancels_stale_timer() {
        let scheduler = FrameScheduler::new();
        let hud: Hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        hud.show(
            HudOptions::with_id("x").auto_dismiss(Duration::from_millis(10)),
            || "short".into(),
        );
        hud.show(HudOptions::with_id("x"), || "sticky".into());
        assert_eq!(scheduler.pending_count(), 0);

        scheduler.advance(Duration::from_millis(50));
        assert!(hud.contains(&HudId::from("x")));
    }

    #[test]
    fn test_stale_timer_cannot_remove_reused_id() {
        let scheduler = FrameScheduler::new();
        let hud: Hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        hud.show(
            HudOptions::with_id("x").auto_dismiss(Duration::from_millis(10)),
            || "first".into(),
        );
        hud.hide("x");
        assert_eq!(scheduler.pending_count(), 0);

        hud.show(HudOptions::with_id("x"), || "second".into());
        scheduler.advance(Duration::from_millis(20));
        assert!(hud.contains(&HudId::from("x")));
    }

    #[test]
    fn test_hide_all_cancels_timers() {
        let scheduler = FrameScheduler::new();
        let hud: Hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());

        for id in ["a", "b"] {
            hud.show(
                HudOptions::with_id(id).auto_dismiss(Duration::from_millis(10)),
                || id.into(),
            );
        }
        assert_eq!(scheduler.pending_count(), 2);

        hud.hide_all();
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_auto_dismiss_without_scheduler_keeps_entry() {
        let hud = hud();
        hud.show(
            HudOptions::with_id("t").auto_dismiss(Duration::from_millis(1)),
            || "t".into(),
        );
        assert!(hud.contains(&HudId::from("t")));
    }

    #[test]
    fn test_auto_dismiss_max_means_never() {
        let scheduler = FrameScheduler::new();
        let hud: Hud = HudManager::with_scheduler(HudDefaults::default(), scheduler.clone());
        scheduler.advance(Duration::from_millis(1));

        hud.show(
            HudOptions::with_id("sticky").auto_dismiss(Duration::MAX),
            || "sticky".into(),
        );
        scheduler.advance(Duration::from_secs(86_400));
        assert!(hud.contains(&HudId::from("sticky")));
    }

    #[test]
    fn test_visibility_events_fire_once_per_edge() {
        let defaults = HudDefaults::default();
        let hud = hud();
        let events = record(&hud);
        let flips = Rc::new(Cell::new(0));
        let f = flips.clone();
        hud.on_presented_change(move |_| f.set(f.get() + 1));

        let slow = Animation::linear(500);
        hud.show(HudOptions::with_id("a").animation(slow), || "a".into());
        show(&hud, "b");
        hud.hide("b");
        hud.hide("a");

        assert_eq!(flips.get(), 2);
        let edges: Vec<_> = events
            .borrow()
            .iter()
            .filter(|e| e.is_visibility_edge())
            .cloned()
            .collect();
        assert_eq!(
            edges,
            vec![
                HudEvent::Presented {
                    animation: defaults.animation
                },
                HudEvent::Dismissed { animation: slow },
            ]
        );
    }

    #[test]
    fn test_event_order_for_show_and_hide() {
        let hud = hud();
        let events = record(&hud);

        show(&hud, "a");
        hud.hide("a");

        let kinds: Vec<_> = events
            .borrow()
            .iter()
            .map(|e| match e {
                HudEvent::Presented { .. } => "presented",
                HudEvent::Dismissed { .. } => "dismissed",
                HudEvent::EntryShown { .. } => "shown",
                HudEvent::EntryReplaced { .. } => "replaced",
                HudEvent::EntryHidden { .. } => "hidden",
                HudEvent::Cleared { .. } => "cleared",
            })
            .collect();
        assert_eq!(kinds, vec!["shown", "presented", "hidden", "dismissed"]);
    }

    #[test]
    fn test_hide_all_emits_single_clear() {
        let hud = hud();
        show(&hud, "a");
        show(&hud, "b");
        show(&hud, "c");
        let events = record(&hud);

        hud.hide_all();

        assert_eq!(
            *events.borrow(),
            vec![
                HudEvent::Cleared { count: 3 },
                HudEvent::Dismissed {
                    animation: HudDefaults::default().animation
                },
            ]
        );
    }

    #[test]
    fn test_hide_all_single_entry_uses_its_animation() {
        let hud = hud();
        let anim = Animation::ease_out(200);
        hud.show(HudOptions::with_id("only").animation(anim), || "only".into());

        hud.hide_all();
        assert_eq!(hud.current_animation(), anim);
    }

    #[test]
    fn test_background_tap_respects_policy_at_tap_time() {
        let hud = hud();
        show(&hud, "a");

        // Default policy is non-interactive
        assert!(!hud.handle_background_tap());
        assert_eq!(hud.len(), 1);

        hud.show(HudOptions::with_id("b").interactive_hide(true), || "b".into());
        assert!(hud.handle_background_tap());
        assert!(hud.is_empty());
    }

    #[test]
    fn test_listener_may_mutate_manager() {
        let hud = hud();
        let handle = hud.clone();
        // Hide the spinner as soon as the result shows up
        hud.subscribe(move |e| {
            if let HudEvent::EntryShown { id } = e {
                if *id == HudId::from("result") {
                    handle.hide("spinner");
                }
            }
        });

        show(&hud, "spinner");
        show(&hud, "result");

        assert_eq!(hud.ids(), vec![HudId::from("result")]);
    }

    #[test]
    fn test_content_factory_runs_once_eagerly() {
        let hud = hud();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        hud.show(HudOptions::new(), move || {
            c.set(c.get() + 1);
            "x".into()
        });
        assert_eq!(calls.get(), 1);

        hud.len();
        hud.current_background_color();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_content_dropped_on_removal() {
        let hud: HudManager<Rc<()>> = HudManager::new(HudDefaults::default());
        let token = Rc::new(());
        let held = token.clone();
        hud.show(HudOptions::with_id("a"), move || held);
        assert_eq!(Rc::strong_count(&token), 2);

        hud.hide("a");
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[derive(Default)]
    struct RecordingHost {
        background: Option<BackgroundLayer>,
        layers: Vec<(HudId, String, usize, Alignment, Transition)>,
    }

    impl PresentationHost<String> for RecordingHost {
        fn background(&mut self, layer: BackgroundLayer) {
            assert!(self.layers.is_empty(), "background must come first");
            self.background = Some(layer);
        }

        fn content(&mut self, layer: ContentLayer<'_, String>) {
            self.layers.push((
                layer.id.clone(),
                layer.content.clone(),
                layer.z_index,
                layer.alignment,
                layer.transition.clone(),
            ));
        }
    }

    #[test]
    fn test_present_describes_stack_bottom_to_top() {
        let hud = hud();
        hud.show(
            HudOptions::with_id("a").background_color(Color::RED),
            || "A".into(),
        );
        hud.show(
            HudOptions::with_id("b")
                .alignment(Alignment::Bottom)
                .transition(Transition::pop())
                .interactive_hide(true),
            || "B".into(),
        );

        let mut host = RecordingHost::default();
        hud.present(&mut host);

        let bg = host.background.expect("background layer");
        assert!(bg.visible);
        assert!(bg.interactive_hide);
        assert_eq!(bg.color, HudDefaults::default().background_color);
        assert_eq!(bg.fade_animation, HudDefaults::default().animation);

        assert_eq!(host.layers.len(), 2);
        assert_eq!(host.layers[0].0, HudId::from("a"));
        assert_eq!(host.layers[0].1, "A");
        assert_eq!(host.layers[0].2, 0);
        assert_eq!(host.layers[1].2, 1);
        assert_eq!(host.layers[1].3, Alignment::Bottom);
        assert_eq!(host.layers[1].4, Transition::pop());
    }

    #[test]
    fn test_present_empty_stack_hides_background() {
        let hud = hud();
        let mut host = RecordingHost::default();
        hud.present(&mut host);

        assert_eq!(host.background.map(|b| b.visible), Some(false));
        assert!(host.layers.is_empty());
    }

    #[test]
    fn test_background_fades_out_with_final_removal() {
        let hud = hud();
        let slow = Animation::ease_out(600);
        hud.show(HudOptions::with_id("a").animation(slow), || "A".into());
        hud.hide("a");

        let mut host = RecordingHost::default();
        hud.present(&mut host);

        let bg = host.background.expect("background layer");
        assert!(!bg.visible);
        assert_eq!(bg.fade_animation, slow);
        assert_eq!(bg.animation, slow);
    }

    #[test]
    fn test_context_provides_manager_to_descendants() {
        let root = Context::new();
        let hud = hud();
        hud.install(&root);

        let nested = root.child().child();
        let found = use_hud::<String>(&nested).expect("manager in context");
        show(&found, "from-child");
        assert!(hud.contains(&HudId::from("from-child")));

        // A different content type is a different service
        assert!(use_hud::<u32>(&nested).is_none());
        assert!(matches!(
            HudManager::<u32>::from_context(&nested),
            Err(HudError::Context(_))
        ));
    }

    #[test]
    fn test_child_scope_can_install_its_own_manager() {
        let root = Context::new();
        let outer = hud();
        outer.install(&root);

        let scope = root.child();
        let inner = hud();
        inner.install(&scope);

        show(&use_hud::<String>(&scope).unwrap(), "inner");
        show(&use_hud::<String>(&root).unwrap(), "outer");

        assert_eq!(inner.ids(), vec![HudId::from("inner")]);
        assert_eq!(outer.ids(), vec![HudId::from("outer")]);
    }

    #[test]
    fn test_listeners_see_final_visibility() {
        let hud = hud();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let handle = hud.clone();
            let seen = seen.clone();
            hud.subscribe(move |e| {
                seen.borrow_mut()
                    .push((e.clone(), handle.is_presented(), handle.len()));
            });
        }

        show(&hud, "a");
        hud.hide("a");
        show(&hud, "b");
        show(&hud, "c");
        hud.hide_all();

        for (event, presented, len) in seen.borrow().iter() {
            assert_eq!(*presented, *len > 0, "{event:?}");
        }
        assert!(seen
            .borrow()
            .iter()
            .any(|(e, presented, _)| matches!(e, HudEvent::Cleared { .. }) && !presented));
    }

    #[test]
    fn test_reentrant_hide_keeps_event_order() {
        let hud = hud();
        let events = record(&hud);
        {
            let handle = hud.clone();
            hud.subscribe(move |e| {
                if let HudEvent::Presented { .. } = e {
                    handle.hide("a");
                }
            });
        }

        show(&hud, "a");

        let a = HudId::from("a");
        let defaults = HudDefaults::default();
        assert_eq!(
            *events.borrow(),
            vec![
                HudEvent::EntryShown { id: a.clone() },
                HudEvent::Presented {
                    animation: defaults.animation
                },
                HudEvent::EntryHidden { id: a },
                HudEvent::Dismissed {
                    animation: Animation::standard()
                },
            ]
        );
        assert!(!hud.is_presented());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Show(u8),
        ShowAnon,
        TryShow(u8),
        Hide(u8),
        HideAll,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4).prop_map(Op::Show),
            Just(Op::ShowAnon),
            (0u8..4).prop_map(Op::TryShow),
            (0u8..5).prop_map(Op::Hide),
            Just(Op::HideAll),
        ]
    }

    proptest! {
        /// Any sequence of mutations keeps the stack, its visibility and the
        /// announced edges in agreement with a plain ordered list of ids.
        #[test]
        fn prop_stack_matches_model(ops in prop::collection::vec(op(), 0..40)) {
            let hud = hud();
            let edges = Rc::new(Cell::new(0i32));
            {
                let edges = edges.clone();
                hud.subscribe(move |e| match e {
                    HudEvent::Presented { .. } => edges.set(edges.get() + 1),
                    HudEvent::Dismissed { .. } => edges.set(edges.get() - 1),
                    _ => {}
                });
            }
            let mut model: Vec<HudId> = Vec::new();

            for op in ops {
                match op {
                    Op::Show(k) => {
                        let id = hud.show(HudOptions::with_id(k as i32), || format!("{k}"));
                        if !model.contains(&id) {
                            model.push(id);
                        }
                    }
                    Op::ShowAnon => {
                        model.push(hud.show(HudOptions::new(), || "anon".into()));
                    }
                    Op::TryShow(k) => {
                        let id = HudId::from(k as i32);
                        let result = hud.try_show(HudOptions::with_id(k as i32), || "try".into());
                        prop_assert_eq!(result.is_ok(), !model.contains(&id));
                        if result.is_ok() {
                            model.push(id);
                        }
                    }
                    Op::Hide(k) => {
                        let id = HudId::from(k as i32);
                        let was_live = model.contains(&id);
                        prop_assert_eq!(hud.hide(&id), was_live);
                        model.retain(|m| *m != id);
                    }
                    Op::HideAll => {
                        prop_assert_eq!(hud.hide_all(), model.len());
                        model.clear();
                    }
                }

                prop_assert_eq!(hud.ids(), model.clone());
                prop_assert_eq!(hud.is_presented(), !model.is_empty());
                prop_assert_eq!(edges.get(), i32::from(hud.is_presented()));
            }
        }
    }
}
