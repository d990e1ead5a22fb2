use super::{Layering, RankConstraints};
use crate::error::Result;
use crate::graphlib::{Graph, alg};
use crate::network_simplex::Cyclic;

/// One layer per rank group, in topological order. Equal ranks share a layer, and a rank is
/// only released once every lower rank is placed. Among ready groups the lowest rank goes
/// first; unranked nodes come after ranked ones, then input order decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalLayering;

impl Layering for TopologicalLayering {
    fn layer(&self, g: &Graph<(), usize>, ranks: &[Option<f64>]) -> Result<Vec<usize>> {
        let constraints = RankConstraints::build(g, ranks)?;

        let mut groups: Graph<(), ()> =
            Graph::with_capacity(constraints.group_count(), constraints.edges.len());
        for group in 0..constraints.group_count() {
            groups.set_node(group.to_string(), ());
        }
        for e in &constraints.edges {
            groups.add_edge(e.v, e.w, ());
        }

        let order = alg::topsort_by_priority(&groups, |group| {
            constraints
                .members
                .get(group)
                .and_then(|&v| ranks.get(v).copied().flatten())
                .filter(|r| r.is_finite())
                .unwrap_or(f64::INFINITY)
        })
        .map_err(|e| constraints.cycle_error(g, Cyclic { node: e.node }))?;

        let mut group_layers = vec![0i64; constraints.group_count()];
        for (layer, group) in order.into_iter().enumerate() {
            group_layers[group] = layer as i64;
        }
        Ok(constraints.node_layers(&group_layers))
    }
}
