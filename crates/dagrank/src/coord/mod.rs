//! Coordinate assignment: continuous x per vertex, given layers and in-layer order.

mod center;
mod greedy;
mod quad;
mod simplex;
mod topological;

pub use center::CenterCoord;
pub use greedy::GreedyCoord;
pub use quad::QuadCoord;
pub use simplex::SimplexCoord;
pub use topological::TopologicalCoord;

use crate::error::Result;
use crate::strategy::{Strategy, StrategyTag};
use crate::sugi::SugiGraph;

/// Vertex widths plus the horizontal gap between neighbours in a layer.
#[derive(Debug, Clone, Copy)]
pub struct Spacing<'a> {
    pub widths: &'a [f64],
    pub gap: f64,
}

impl Spacing<'_> {
    pub fn width(&self, v: usize) -> f64 {
        self.widths.get(v).copied().unwrap_or(0.0)
    }

    /// Minimum centre distance between `left` and `right` when adjacent in a layer.
    pub fn separation(&self, left: usize, right: usize) -> f64 {
        (self.width(left) + self.width(right)) / 2.0 + self.gap
    }
}

pub trait Coord {
    /// Returns an x per vertex of `g`. Adjacent vertices of a layer should be at least
    /// [`Spacing::separation`] apart; the caller shifts the result so the leftmost edge is 0.
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordKind {
    #[default]
    Simplex,
    Greedy,
    Quad,
    Center,
    Topological,
}

impl StrategyTag for CoordKind {
    const STAGE: &'static str = "coord";

    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "simplex" => Some(Self::Simplex),
            "greedy" => Some(Self::Greedy),
            "quad" => Some(Self::Quad),
            "center" => Some(Self::Center),
            "topological" => Some(Self::Topological),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Simplex => "simplex",
            Self::Greedy => "greedy",
            Self::Quad => "quad",
            Self::Center => "center",
            Self::Topological => "topological",
        }
    }
}

pub type CoordStrategy = Strategy<CoordKind, dyn Coord>;

static SIMPLEX: SimplexCoord = SimplexCoord;
static GREEDY: GreedyCoord = GreedyCoord;
static QUAD: QuadCoord = QuadCoord::DEFAULT;
static CENTER: CenterCoord = CenterCoord;
static TOPOLOGICAL: TopologicalCoord = TopologicalCoord;

impl CoordStrategy {
    pub fn resolve(&self) -> &dyn Coord {
        match self {
            Self::Named(CoordKind::Simplex) => &SIMPLEX,
            Self::Named(CoordKind::Greedy) => &GREEDY,
            Self::Named(CoordKind::Quad) => &QUAD,
            Self::Named(CoordKind::Center) => &CENTER,
            Self::Named(CoordKind::Topological) => &TOPOLOGICAL,
            Self::Custom(custom) => custom.as_ref(),
        }
    }
}

/// Straightness weight of an edge: long-edge chains pull hardest.
pub(crate) fn edge_weight(g: &SugiGraph, v: usize, w: usize) -> f64 {
    let dummy = |x: usize| g.node(x).is_some_and(|n| n.is_dummy());
    match (dummy(v), dummy(w)) {
        (false, false) => 1.0,
        (true, true) => 8.0,
        _ => 2.0,
    }
}

/// Packs `layer` tightly from `x = width(first) / 2`, writing into `xs`.
pub(crate) fn pack(layer: &[usize], spacing: &Spacing<'_>, xs: &mut [f64]) {
    let mut prev: Option<usize> = None;
    for &v in layer {
        xs[v] = match prev {
            None => spacing.width(v) / 2.0,
            Some(p) => xs[p] + spacing.separation(p, v),
        };
        prev = Some(v);
    }
}

/// Right edge of a packed layer.
pub(crate) fn packed_extent(layer: &[usize], spacing: &Spacing<'_>, xs: &[f64]) -> f64 {
    layer
        .last()
        .map_or(0.0, |&v| xs[v] + spacing.width(v) / 2.0)
}
