//! Layout hints
//!
//! Halo never lays anything out itself. These types are carried on overlay
//! entries and handed to the presentation host untouched.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Where content sits inside its layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    TopLeading,
    Top,
    TopTrailing,
    Leading,
    #[default]
    Center,
    Trailing,
    BottomLeading,
    Bottom,
    BottomTrailing,
}

/// A single screen edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Leading,
    Trailing,
}

bitflags! {
    /// A set of edges (used for safe-area opt-outs)
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Edges: u8 {
        const NONE = 0;
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEADING = 1 << 2;
        const TRAILING = 1 << 3;
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const HORIZONTAL = Self::LEADING.bits() | Self::TRAILING.bits();
        const ALL = Self::VERTICAL.bits() | Self::HORIZONTAL.bits();
    }
}

impl Default for Edges {
    fn default() -> Self {
        Edges::empty()
    }
}

impl Edges {
    /// Contained edges in top, bottom, leading, trailing order
    pub fn edges(self) -> impl Iterator<Item = Edge> {
        [Edge::Top, Edge::Bottom, Edge::Leading, Edge::Trailing]
            .into_iter()
            .filter(move |e| self.contains(Edges::from(*e)))
    }
}

impl From<Edge> for Edges {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => Edges::TOP,
            Edge::Bottom => Edges::BOTTOM,
            Edge::Leading => Edges::LEADING,
            Edge::Trailing => Edges::TRAILING,
        }
    }
}
