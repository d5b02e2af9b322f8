//! Content layer transitions
//!
//! A [`Transition`] describes how a content layer looks while it is not
//! fully present: faded, scaled down, pushed off an edge, or any combination.
//! Hosts resolve it against a visibility value (0 = gone, 1 = fully shown)
//! to get concrete layer properties.

use halo_core::Edge;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One component of a transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEffect {
    /// Fade from fully transparent
    Opacity,
    /// Grow from `from` to full size
    Scale { from: f32 },
    /// Slide in from beyond an edge (offset measured in layer sizes)
    Move { edge: Edge },
    /// Slide in from a fixed offset in logical pixels
    Offset { x: f32, y: f32 },
}

/// Resolved visual properties of a transitioning layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub opacity: f32,
    pub scale: f32,
    /// Translation as a fraction of the layer's own size
    pub relative_offset: (f32, f32),
    /// Translation in logical pixels
    pub offset: (f32, f32),
}

impl LayerStyle {
    pub const VISIBLE: LayerStyle = LayerStyle {
        opacity: 1.0,
        scale: 1.0,
        relative_offset: (0.0, 0.0),
        offset: (0.0, 0.0),
    };
}

/// Enter/exit appearance of a content layer
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transition {
    effects: SmallVec<[TransitionEffect; 3]>,
}

impl Transition {
    /// No visual change; the layer simply appears
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn opacity() -> Self {
        Self::from_effect(TransitionEffect::Opacity)
    }

    /// Scale from half size
    pub fn scale() -> Self {
        Self::scale_from(0.5)
    }

    pub fn scale_from(from: f32) -> Self {
        Self::from_effect(TransitionEffect::Scale { from })
    }

    pub fn move_from(edge: Edge) -> Self {
        Self::from_effect(TransitionEffect::Move { edge })
    }

    pub fn offset(x: f32, y: f32) -> Self {
        Self::from_effect(TransitionEffect::Offset { x, y })
    }

    /// Opacity combined with scale, the usual HUD pop-in
    pub fn pop() -> Self {
        Self::opacity().combined(Self::scale())
    }

    fn from_effect(effect: TransitionEffect) -> Self {
        let mut effects = SmallVec::new();
        effects.push(effect);
        Self { effects }
    }

    /// Apply `other` on top of this transition
    pub fn combined(mut self, other: Transition) -> Self {
        self.effects.extend(other.effects);
        self
    }

    pub fn effects(&self) -> &[TransitionEffect] {
        &self.effects
    }

    pub fn is_identity(&self) -> bool {
        self.effects.is_empty()
    }

    /// Resolve layer properties at `visibility` (0 = absent, 1 = fully shown)
    pub fn resolve(&self, visibility: f32) -> LayerStyle {
        let v = visibility.clamp(0.0, 1.0);
        let hidden = 1.0 - v;
        let mut style = LayerStyle::VISIBLE;

        for effect in &self.effects {
            match *effect {
                TransitionEffect::Opacity => style.opacity *= v,
                TransitionEffect::Scale { from } => style.scale *= from + (1.0 - from) * v,
                TransitionEffect::Move { edge } => {
                    let (dx, dy) = match edge {
                        Edge::Top => (0.0, -1.0),
                        Edge::Bottom => (0.0, 1.0),
                        Edge::Leading => (-1.0, 0.0),
                        Edge::Trailing => (1.0, 0.0),
                    };
                    style.relative_offset.0 += dx * hidden;
                    style.relative_offset.1 += dy * hidden;
                }
                TransitionEffect::Offset { x, y } => {
                    style.offset.0 += x * hidden;
                    style.offset.1 += y * hidden;
                }
            }
        }

        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_always_visible() {
        let t = Transition::identity();
        assert!(t.is_identity());
        assert_eq!(t.resolve(0.0), LayerStyle::VISIBLE);
    }

    #[test]
    fn test_pop_resolves_opacity_and_scale() {
        let t = Transition::pop();
        assert_eq!(t.effects().len(), 2);

        let hidden = t.resolve(0.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.scale, 0.5);

        let half = t.resolve(0.5);
        assert_eq!(half.opacity, 0.5);
        assert_eq!(half.scale, 0.75);

        assert_eq!(t.resolve(1.0), LayerStyle::VISIBLE);
    }

    #[test]
    fn test_move_pushes_off_edge() {
        let t = Transition::move_from(Edge::Bottom).combined(Transition::offset(0.0, 20.0));
        let hidden = t.resolve(0.0);
        assert_eq!(hidden.relative_offset, (0.0, 1.0));
        assert_eq!(hidden.offset, (0.0, 20.0));
        assert_eq!(t.resolve(1.0).relative_offset, (0.0, 0.0));
    }

    #[test]
    fn test_deserialize_effect_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            transition: Transition,
        }

        let w: Wrapper = toml::from_str(
            r#"transition = [{ type = "opacity" }, { type = "move", edge = "top" }]"#,
        )
        .unwrap();
        assert_eq!(
            w.transition,
            Transition::opacity().combined(Transition::move_from(Edge::Top))
        );
    }
}
