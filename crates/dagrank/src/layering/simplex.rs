use super::{Layering, RankConstraints};
use crate::error::Result;
use crate::graphlib::Graph;
use crate::network_simplex;

/// Network-simplex layering: minimises the total edge length.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplexLayering;

impl Layering for SimplexLayering {
    fn layer(&self, g: &Graph<(), usize>, ranks: &[Option<f64>]) -> Result<Vec<usize>> {
        let constraints = RankConstraints::build(g, ranks)?;
        let group_ranks = network_simplex::solve(constraints.group_count(), &constraints.edges)
            .map_err(|cyclic| constraints.cycle_error(g, cyclic))?;
        Ok(constraints.node_layers(&group_ranks))
    }
}
