//! Crossing reduction: ordering vertices within each layer.

mod cross_count;
mod dfs;
mod opt;
mod two_layer;

pub use cross_count::{cross_count, two_layer_cross_count};
pub use dfs::DfsDecross;
pub use opt::OptDecross;
pub use two_layer::{Aggregator, TwoLayerDecross};

use crate::error::Result;
use crate::strategy::{Strategy, StrategyTag};
use crate::sugi::SugiGraph;

pub trait Decross {
    /// Reorders each layer in place. Layers must keep the same vertex sets.
    fn decross(&self, g: &SugiGraph, layers: &mut [Vec<usize>]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecrossKind {
    #[default]
    TwoLayer,
    Opt,
    Dfs,
}

impl StrategyTag for DecrossKind {
    const STAGE: &'static str = "decross";

    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "twoLayer" => Some(Self::TwoLayer),
            "opt" => Some(Self::Opt),
            "dfs" => Some(Self::Dfs),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::TwoLayer => "twoLayer",
            Self::Opt => "opt",
            Self::Dfs => "dfs",
        }
    }
}

pub type DecrossStrategy = Strategy<DecrossKind, dyn Decross>;

static TWO_LAYER: TwoLayerDecross = TwoLayerDecross::DEFAULT;
static OPT: OptDecross = OptDecross::DEFAULT;
static DFS: DfsDecross = DfsDecross;

impl DecrossStrategy {
    pub fn resolve(&self) -> &dyn Decross {
        match self {
            Self::Named(DecrossKind::TwoLayer) => &TWO_LAYER,
            Self::Named(DecrossKind::Opt) => &OPT,
            Self::Named(DecrossKind::Dfs) => &DFS,
            Self::Custom(custom) => custom.as_ref(),
        }
    }
}
