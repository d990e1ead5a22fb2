use super::{Coord, Spacing, pack};
use crate::error::Result;
use crate::sugi::SugiGraph;

/// Priority placement: each layer is settled against its fixed neighbour layer, moving vertices
/// toward the mean of their neighbours in priority order (long-edge dummies first, then by
/// degree). A vertex never crosses a higher-priority vertex that is already placed; lower
/// priority vertices are pushed aside.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCoord;

impl GreedyCoord {
    fn settle(
        g: &SugiGraph,
        layer: &[usize],
        spacing: &Spacing<'_>,
        xs: &mut [f64],
        downward: bool,
    ) {
        let mut order: Vec<usize> = (0..layer.len()).collect();
        order.sort_by_key(|&slot| {
            let v = layer[slot];
            let dummy = g.node(v).is_some_and(|n| n.is_dummy());
            (!dummy, std::cmp::Reverse(g.in_degree(v) + g.out_degree(v)), slot)
        });

        let mut placed = vec![false; layer.len()];
        for slot in order {
            let v = layer[slot];
            let neighbours: Vec<usize> = if downward {
                g.predecessors(v).collect()
            } else {
                g.successors(v).collect()
            };
            let desired = if neighbours.is_empty() {
                xs[v]
            } else {
                neighbours.iter().map(|&u| xs[u]).sum::<f64>() / neighbours.len() as f64
            };

            // Window left open by already placed vertices.
            let mut lo = f64::NEG_INFINITY;
            let mut dist = 0.0;
            for k in (0..slot).rev() {
                dist += spacing.separation(layer[k], layer[k + 1]);
                if placed[k] {
                    lo = xs[layer[k]] + dist;
                    break;
                }
            }
            let mut hi = f64::INFINITY;
            let mut dist = 0.0;
            for k in slot + 1..layer.len() {
                dist += spacing.separation(layer[k - 1], layer[k]);
                if placed[k] {
                    hi = xs[layer[k]] - dist;
                    break;
                }
            }
            xs[v] = desired.max(lo).min(hi);
            placed[slot] = true;

            for k in (0..slot).rev() {
                if placed[k] {
                    break;
                }
                let limit = xs[layer[k + 1]] - spacing.separation(layer[k], layer[k + 1]);
                xs[layer[k]] = xs[layer[k]].min(limit);
            }
            for k in slot + 1..layer.len() {
                if placed[k] {
                    break;
                }
                let limit = xs[layer[k - 1]] + spacing.separation(layer[k - 1], layer[k]);
                xs[layer[k]] = xs[layer[k]].max(limit);
            }
        }
    }
}

impl Coord for GreedyCoord {
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>> {
        let mut xs = vec![0.0; g.node_count()];
        for layer in layers {
            pack(layer, spacing, &mut xs);
        }
        for layer in layers.iter().skip(1) {
            Self::settle(g, layer, spacing, &mut xs, true);
        }
        for layer in layers.iter().rev().skip(1) {
            Self::settle(g, layer, spacing, &mut xs, false);
        }
        Ok(xs)
    }
}
