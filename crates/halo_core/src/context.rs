//! Scoped context for ambient dependencies
//!
//! A `Context` is a tree of type-keyed scopes. A value provided in a scope is
//! visible to that scope and every descendant, unless a descendant provides
//! its own value of the same type. This is how nested components reach a
//! shared service (the HUD manager, for instance) without threading it
//! through every constructor, while still keeping one owner per subtree.
//!
//! ```rust
//! use halo_core::Context;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Theme(&'static str);
//!
//! let root = Context::new();
//! root.provide(Theme("dark"));
//!
//! let child = root.child();
//! assert_eq!(child.get::<Theme>(), Some(Theme("dark")));
//!
//! child.provide(Theme("light"));
//! assert_eq!(child.get::<Theme>(), Some(Theme("light")));
//! assert_eq!(root.get::<Theme>(), Some(Theme("dark")));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ContextError, Result};

struct Scope {
    values: RefCell<FxHashMap<TypeId, Rc<dyn Any>>>,
    parent: Option<Context>,
    depth: usize,
}

/// Handle to a context scope (cheap to clone)
#[derive(Clone)]
pub struct Context {
    scope: Rc<Scope>,
}

impl Context {
    /// Create a root scope
    pub fn new() -> Self {
        Self {
            scope: Rc::new(Scope {
                values: RefCell::new(FxHashMap::default()),
                parent: None,
                depth: 0,
            }),
        }
    }

    /// Create a child scope that inherits everything visible here
    pub fn child(&self) -> Self {
        Self {
            scope: Rc::new(Scope {
                values: RefCell::new(FxHashMap::default()),
                parent: Some(self.clone()),
                depth: self.scope.depth + 1,
            }),
        }
    }

    /// Nesting depth (0 for a root scope)
    pub fn depth(&self) -> usize {
        self.scope.depth
    }

    /// Provide a value for this scope, replacing any value of the same type
    /// previously provided here
    pub fn provide<T: Clone + 'static>(&self, value: T) {
        tracing::trace!(
            depth = self.scope.depth,
            ty = std::any::type_name::<T>(),
            "context provide"
        );
        self.scope
            .values
            .borrow_mut()
            .insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Remove the value of type `T` from this scope (parents are untouched)
    pub fn revoke<T: 'static>(&self) -> bool {
        self.scope
            .values
            .borrow_mut()
            .remove(&TypeId::of::<T>())
            .is_some()
    }

    /// Look up the nearest value of type `T`
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        let mut current = Some(self);
        while let Some(ctx) = current {
            let found = ctx
                .scope
                .values
                .borrow()
                .get(&TypeId::of::<T>())
                .and_then(|v| v.downcast_ref::<T>().cloned());
            if found.is_some() {
                return found;
            }
            current = ctx.scope.parent.as_ref();
        }
        None
    }

    /// Look up the nearest value of type `T`, failing if none was provided
    pub fn require<T: Clone + 'static>(&self) -> Result<T> {
        self.get::<T>()
            .ok_or(ContextError::Missing(std::any::type_name::<T>()))
    }

    /// Check whether a value of type `T` is visible from this scope
    pub fn has<T: 'static>(&self) -> bool {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if ctx
                .scope
                .values
                .borrow()
                .contains_key(&TypeId::of::<T>())
            {
                return true;
            }
            current = ctx.scope.parent.as_ref();
        }
        false
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.scope.depth)
            .field("values", &self.scope.values.borrow().len())
            .finish()
    }
}
