//! Halo Core
//!
//! Foundational primitives shared by the Halo overlay crates:
//!
//! - **Color**: Linear RGBA color values
//! - **Layout Hints**: Alignment and safe-area edge sets passed through to hosts
//! - **Observables**: Change-notifying values and event emitters
//! - **Context**: Scoped, type-keyed dependency injection for UI subtrees
//!
//! # Example
//!
//! ```rust
//! use halo_core::Observable;
//!
//! let visible = Observable::new(false);
//! let _sub = visible.subscribe(|v| println!("visible: {v}"));
//!
//! assert!(visible.set(true));
//! // Re-assigning the same value does not notify
//! assert!(!visible.set(true));
//! ```

pub mod color;
pub mod context;
pub mod error;
pub mod layout;
pub mod observable;

pub use color::Color;
pub use context::Context;
pub use error::{ContextError, Result};
pub use layout::{Alignment, Edge, Edges};
pub use observable::{Emitter, Observable, SubscriptionId};
