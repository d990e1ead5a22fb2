use super::{Layering, RankConstraints};
use crate::error::Result;
use crate::graphlib::Graph;
use crate::network_simplex;

/// Places every node on the earliest layer its predecessors (and rank) allow.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestPathLayering;

impl Layering for LongestPathLayering {
    fn layer(&self, g: &Graph<(), usize>, ranks: &[Option<f64>]) -> Result<Vec<usize>> {
        let constraints = RankConstraints::build(g, ranks)?;
        let group_ranks =
            network_simplex::longest_path(constraints.group_count(), &constraints.edges)
                .map_err(|cyclic| constraints.cycle_error(g, cyclic))?;
        Ok(constraints.node_layers(&group_ranks))
    }
}
