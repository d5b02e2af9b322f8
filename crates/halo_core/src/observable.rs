//! Change-notifying values and event emitters
//!
//! Both types are single-threaded and safe to re-enter: listeners are
//! snapshotted before they run, so a listener may read the value, subscribe,
//! unsubscribe, or trigger another notification without tripping a borrow.
//!
//! # Example
//!
//! ```rust
//! use halo_core::{Emitter, Observable};
//!
//! let count = Observable::new(0usize);
//! let id = count.subscribe(|n| println!("count = {n}"));
//! count.set(1);
//! count.unsubscribe(id);
//!
//! let events: Emitter<&'static str> = Emitter::new();
//! events.subscribe(|e| println!("event: {e}"));
//! events.emit(&"opened");
//! ```

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe
    pub struct SubscriptionId;
}

type Listener<T> = Rc<dyn Fn(&T)>;

/// A list of listeners for values of type `T`
pub struct Emitter<T> {
    listeners: RefCell<SlotMap<SubscriptionId, Listener<T>>>,
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Register a listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.listeners.borrow_mut().insert(Rc::new(listener))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(id).is_some()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `value` to every listener registered at the time of the call
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(value);
        }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value that notifies listeners when it actually changes
///
/// `set` with a value equal to the current one is silently dropped, so
/// listeners see exactly one notification per real transition.
pub struct Observable<T> {
    value: RefCell<T>,
    changed: Emitter<T>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            changed: Emitter::new(),
        }
    }

    /// Get a copy of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value, notifying listeners if it differs
    ///
    /// Returns true if the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.changed.emit(&value);
        true
    }

    /// Update the value in place via a closure
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.value.borrow());
        self.set(next)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.changed.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.borrow())
            .field("listeners", &self.changed.listener_count())
            .finish()
    }
}
