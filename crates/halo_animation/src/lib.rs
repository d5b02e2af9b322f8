//! Halo Animation
//!
//! Descriptors for how overlay state changes should animate, plus the
//! frame-driven timer queue used for auto-dismiss.
//!
//! # Features
//!
//! - **Animations**: Easing curve, duration, and delay in one `Copy` value
//! - **Spring Curves**: Damped springs evaluated in closed form
//! - **Transitions**: Composable opacity/scale/move effects for content layers
//! - **FrameScheduler**: One-shot deferred callbacks on a host-driven clock

pub mod animation;
pub mod easing;
pub mod spring;
pub mod timer;
pub mod transition;

pub use animation::Animation;
pub use easing::Easing;
pub use spring::SpringConfig;
pub use timer::{FrameScheduler, TimerId};
pub use transition::{LayerStyle, Transition, TransitionEffect};
