//! Layering: assigning every DAG node to a discrete layer.
//!
//! Layerings receive the caller's resolved rank per node. Every built-in strategy honours it as
//! a constraint (equal ranks share a layer, lower ranks come strictly earlier); `topological`
//! also uses it to order ready nodes.

mod longest_path;
mod simplex;
mod topological;

pub use longest_path::LongestPathLayering;
pub use simplex::SimplexLayering;
pub use topological::TopologicalLayering;

use crate::error::{Error, Result};
use crate::graphlib::{Graph, alg};
use crate::network_simplex::{Cyclic, SimplexEdge};
use crate::strategy::{Strategy, StrategyTag};
use crate::util::quantize;
use std::collections::BTreeMap;

pub trait Layering {
    /// Returns a layer per node of `g` (same indexing); the smallest layer is 0 and every edge
    /// must go to a strictly larger layer. `ranks` holds the resolved caller rank per node.
    fn layer(&self, g: &Graph<(), usize>, ranks: &[Option<f64>]) -> Result<Vec<usize>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayeringKind {
    #[default]
    Simplex,
    LongestPath,
    Topological,
}

impl StrategyTag for LayeringKind {
    const STAGE: &'static str = "layering";

    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "simplex" => Some(Self::Simplex),
            "longestPath" => Some(Self::LongestPath),
            "topological" => Some(Self::Topological),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Simplex => "simplex",
            Self::LongestPath => "longestPath",
            Self::Topological => "topological",
        }
    }
}

pub type LayeringStrategy = Strategy<LayeringKind, dyn Layering>;

static SIMPLEX: SimplexLayering = SimplexLayering;
static LONGEST_PATH: LongestPathLayering = LongestPathLayering;
static TOPOLOGICAL: TopologicalLayering = TopologicalLayering;

impl LayeringStrategy {
    pub fn resolve(&self) -> &dyn Layering {
        match self {
            Self::Named(LayeringKind::Simplex) => &SIMPLEX,
            Self::Named(LayeringKind::LongestPath) => &LONGEST_PATH,
            Self::Named(LayeringKind::Topological) => &TOPOLOGICAL,
            Self::Custom(custom) => custom.as_ref(),
        }
    }
}

fn node_name(g: &Graph<(), usize>, v: usize) -> String {
    g.node_id(v).unwrap_or_default().to_string()
}

pub(crate) fn check_acyclic(g: &Graph<(), usize>) -> Result<()> {
    alg::topsort(g).map(|_| ()).map_err(|e| Error::Cycle {
        node: node_name(g, e.node),
    })
}

/// The layering problem after merging equal-rank nodes into groups.
#[derive(Debug, Clone)]
pub(crate) struct RankConstraints {
    pub group_of: Vec<usize>,
    /// A representative node per group, for error reporting.
    pub members: Vec<usize>,
    pub edges: Vec<SimplexEdge>,
}

impl RankConstraints {
    pub fn build(g: &Graph<(), usize>, ranks: &[Option<f64>]) -> Result<Self> {
        check_acyclic(g)?;

        let rank_of = |v: usize| ranks.get(v).copied().flatten().filter(|r| r.is_finite());
        let mut by_rank: BTreeMap<i128, usize> = BTreeMap::new();
        let mut members: Vec<usize> = Vec::new();
        let mut group_of: Vec<usize> = Vec::with_capacity(g.node_count());

        for v in 0..g.node_count() {
            let group = match rank_of(v) {
                Some(r) => *by_rank.entry(quantize(r)).or_insert_with(|| {
                    members.push(v);
                    members.len() - 1
                }),
                None => {
                    members.push(v);
                    members.len() - 1
                }
            };
            group_of.push(group);
        }

        let mut edges: Vec<SimplexEdge> = Vec::with_capacity(g.edge_count() + by_rank.len());
        for e in g.edges() {
            let conflict = match (rank_of(e.v), rank_of(e.w)) {
                (Some(rv), Some(rw)) => quantize(rw) <= quantize(rv),
                _ => false,
            };
            if conflict {
                return Err(Error::RankConflict {
                    from: node_name(g, e.v),
                    to: node_name(g, e.w),
                });
            }
            edges.push(SimplexEdge {
                v: group_of[e.v],
                w: group_of[e.w],
                minlen: 1,
                weight: 1.0,
            });
        }

        // Consecutive ranks: later rank strictly below, no pull on the objective.
        let ordered: Vec<usize> = by_rank.values().copied().collect();
        for pair in ordered.windows(2) {
            edges.push(SimplexEdge {
                v: pair[0],
                w: pair[1],
                minlen: 1,
                weight: 0.0,
            });
        }

        Ok(Self {
            group_of,
            members,
            edges,
        })
    }

    pub fn group_count(&self) -> usize {
        self.members.len()
    }

    pub fn cycle_error(&self, g: &Graph<(), usize>, cyclic: Cyclic) -> Error {
        let node = self.members.get(cyclic.node).copied().unwrap_or(0);
        Error::Cycle {
            node: node_name(g, node),
        }
    }

    /// Spreads group ranks back onto nodes.
    pub fn node_layers(&self, group_ranks: &[i64]) -> Vec<usize> {
        self.group_of
            .iter()
            .map(|&group| group_ranks[group].max(0) as usize)
            .collect()
    }
}
