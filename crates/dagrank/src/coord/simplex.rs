use super::{Coord, Spacing, edge_weight};
use crate::error::{Error, Result};
use crate::network_simplex::{self, SimplexEdge};
use crate::sugi::SugiGraph;

/// Fixed-point resolution of the auxiliary problem (units per coordinate unit).
const SCALE: f64 = 1000.0;

/// Optimal `Σ ω·|x_u − x_v|` placement via network simplex on Gansner's auxiliary graph: one
/// extra node per edge pulling both endpoints, plus in-layer separation edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplexCoord;

impl Coord for SimplexCoord {
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>> {
        let n = g.node_count();
        let mut edges: Vec<SimplexEdge> = Vec::with_capacity(g.edge_count() * 2 + n);

        for (aux, e) in g.edges().enumerate() {
            let weight = edge_weight(g, e.v, e.w);
            for end in [e.v, e.w] {
                edges.push(SimplexEdge {
                    v: n + aux,
                    w: end,
                    minlen: 0,
                    weight,
                });
            }
        }
        for layer in layers {
            for pair in layer.windows(2) {
                edges.push(SimplexEdge {
                    v: pair[0],
                    w: pair[1],
                    minlen: (spacing.separation(pair[0], pair[1]) * SCALE).round() as i64,
                    weight: 0.0,
                });
            }
        }

        let ranks = network_simplex::solve(n + g.edge_count(), &edges).map_err(|cyclic| {
            Error::Cycle {
                node: g.node_id(cyclic.node).unwrap_or_default().to_string(),
            }
        })?;
        Ok(ranks[..n].iter().map(|&r| r as f64 / SCALE).collect())
    }
}
