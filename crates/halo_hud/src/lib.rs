//! Halo HUD
//!
//! A stack of simultaneously visible overlays (spinners, alerts, toasts)
//! sharing one dimmed background.
//!
//! # Features
//!
//! - **Stacking**: Any number of entries, ordered bottom to top
//! - **Shared Background**: Color and tap-to-dismiss follow the top entry
//! - **Auto-dismiss**: Per-entry timers driven by a [`FrameScheduler`]
//! - **Toasts**: Positioned, transparent-background presets
//! - **Scoped Access**: One manager per [`Context`] subtree
//!
//! # Example
//!
//! ```rust
//! use halo_hud::{Context, HudDefaults, HudManager, HudOptions, use_hud};
//!
//! let root = Context::new();
//! HudManager::<String>::new(HudDefaults::default()).install(&root);
//!
//! // Somewhere deep in the tree
//! let hud = use_hud::<String>(&root.child()).unwrap();
//! let id = hud.show(HudOptions::new().interactive_hide(true), || "Saving…".into());
//!
//! assert!(hud.is_presented());
//! hud.hide(&id);
//! assert!(!hud.is_presented());
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod event;
pub mod host;
pub mod id;
pub mod manager;
pub mod stack;
pub mod toast;

pub use config::HudDefaults;
pub use entry::{HudEntry, HudOptions, HudStyle};
pub use error::{HudError, Result};
pub use event::HudEvent;
pub use host::{BackgroundLayer, ContentLayer, PresentationHost};
pub use id::HudId;
pub use manager::{use_hud, HudManager};
pub use stack::HudStack;
pub use toast::{toast_options, ToastPosition, ToastStyle};

// Re-export the types that appear in this crate's API
pub use halo_animation::{Animation, Easing, FrameScheduler, SpringConfig, Transition};
pub use halo_core::{Alignment, Color, Context, Edge, Edges, SubscriptionId};
