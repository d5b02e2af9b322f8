//! Presentation host contract
//!
//! A host is whatever turns the stack into pixels: a widget tree, a
//! retained scene graph, a terminal UI. [`HudManager::present`] walks the
//! stack and hands the host one background layer followed by one content
//! layer per entry, bottom to top.
//!
//! ```rust
//! use halo_hud::{BackgroundLayer, ContentLayer, HudDefaults, HudManager, HudOptions, PresentationHost};
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl PresentationHost<String> for Log {
//!     fn background(&mut self, layer: BackgroundLayer) {
//!         self.0.push(format!("background visible={}", layer.visible));
//!     }
//!
//!     fn content(&mut self, layer: ContentLayer<'_, String>) {
//!         self.0.push(format!("{} at z={}", layer.content, layer.z_index));
//!     }
//! }
//!
//! let hud = HudManager::new(HudDefaults::default());
//! hud.show(HudOptions::with_id("spinner"), || "Loading…".to_string());
//!
//! let mut host = Log::default();
//! hud.present(&mut host);
//! assert_eq!(host.0, ["background visible=true", "Loading… at z=0"]);
//! ```
//!
//! [`HudManager::present`]: crate::HudManager::present

use halo_animation::{Animation, Transition};
use halo_core::{Alignment, Color, Edges};

use crate::id::HudId;

/// The single shared layer drawn beneath all content
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundLayer {
    /// True iff the stack is non-empty
    pub visible: bool,
    /// Top entry's override or the default color
    pub color: Color,
    /// Whether a tap on this layer should dismiss everything
    pub interactive_hide: bool,
    /// Animation of the most recent push or removal
    ///
    /// Use it for changes to `color` and `interactive_hide` while the layer
    /// stays visible.
    pub animation: Animation,
    /// Animation for fading the layer in or out when `visible` flips
    ///
    /// The default animation on appearance, and the final removal's
    /// animation on disappearance.
    pub fade_animation: Animation,
}

/// One entry's content, borrowed for the duration of a `present` call
#[derive(Debug)]
pub struct ContentLayer<'a, C> {
    pub id: &'a HudId,
    pub content: &'a C,
    pub transition: &'a Transition,
    pub animation: Animation,
    pub alignment: Alignment,
    pub ignores_safe_area: Edges,
    /// Position in the stack, 0 = bottom
    pub z_index: usize,
}

/// Rendering surface driven by a [`HudManager`](crate::HudManager)
///
/// `background` is called exactly once per `present`, before any `content`
/// call. Implementations must not mutate the manager from inside these
/// callbacks; record taps and forward them with
/// [`HudManager::handle_background_tap`](crate::HudManager::handle_background_tap)
/// once `present` returns.
pub trait PresentationHost<C> {
    fn background(&mut self, layer: BackgroundLayer);

    fn content(&mut self, layer: ContentLayer<'_, C>);
}
