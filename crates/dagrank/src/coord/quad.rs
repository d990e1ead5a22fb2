use super::{Coord, Spacing, edge_weight, pack};
use crate::error::Result;
use crate::sugi::SugiGraph;

/// Pull of a vertex without neighbours toward its current position.
const ANCHOR_WEIGHT: f64 = 1e-3;

/// Minimises the convex objective `Σ ω·(x_u − x_v)²` under the separation constraints.
///
/// Each step solves one layer exactly with the others fixed: the layer objective reduces to a
/// weighted least-squares fit to neighbour means, and the separation constraints become an
/// isotonic regression after subtracting cumulative separations (pool adjacent violators).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCoord {
    pub iterations: usize,
    pub tolerance: f64,
}

impl QuadCoord {
    pub const DEFAULT: Self = Self {
        iterations: 64,
        tolerance: 1e-6,
    };
}

impl Default for QuadCoord {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weighted isotonic regression with minimum gaps: minimises `Σ wᵢ (xᵢ − tᵢ)²` subject to
/// `xᵢ₊₁ − xᵢ ≥ gapᵢ`.
pub(crate) fn fit_with_gaps(targets: &[f64], weights: &[f64], gaps: &[f64]) -> Vec<f64> {
    let n = targets.len();
    let mut offsets = vec![0.0; n];
    for i in 1..n {
        offsets[i] = offsets[i - 1] + gaps[i - 1];
    }

    struct Block {
        weight: f64,
        weighted_sum: f64,
        len: usize,
    }
    impl Block {
        fn mean(&self) -> f64 {
            self.weighted_sum / self.weight
        }
    }

    let mut blocks: Vec<Block> = Vec::with_capacity(n);
    for i in 0..n {
        let w = weights[i].max(1e-12);
        blocks.push(Block {
            weight: w,
            weighted_sum: w * (targets[i] - offsets[i]),
            len: 1,
        });
        while blocks.len() >= 2 {
            let last = blocks.len() - 1;
            if blocks[last - 1].mean() <= blocks[last].mean() {
                break;
            }
            let Some(top) = blocks.pop() else {
                break;
            };
            let prev = &mut blocks[last - 1];
            prev.weight += top.weight;
            prev.weighted_sum += top.weighted_sum;
            prev.len += top.len;
        }
    }

    let mut out = Vec::with_capacity(n);
    for block in &blocks {
        let mean = block.mean();
        for _ in 0..block.len {
            out.push(mean + offsets[out.len()]);
        }
    }
    out
}

impl QuadCoord {
    /// Solves one layer with its neighbours fixed; returns the largest move.
    fn relax(g: &SugiGraph, layer: &[usize], spacing: &Spacing<'_>, xs: &mut [f64]) -> f64 {
        let mut targets = Vec::with_capacity(layer.len());
        let mut weights = Vec::with_capacity(layer.len());
        for &v in layer {
            let mut weight = 0.0;
            let mut sum = 0.0;
            for u in g.predecessors(v).chain(g.successors(v)) {
                let w = edge_weight(g, u, v);
                weight += w;
                sum += w * xs[u];
            }
            if weight > 0.0 {
                targets.push(sum / weight);
                weights.push(weight);
            } else {
                targets.push(xs[v]);
                weights.push(ANCHOR_WEIGHT);
            }
        }
        let gaps: Vec<f64> = layer
            .windows(2)
            .map(|pair| spacing.separation(pair[0], pair[1]))
            .collect();

        let fitted = fit_with_gaps(&targets, &weights, &gaps);
        let mut moved: f64 = 0.0;
        for (&v, x) in layer.iter().zip(fitted) {
            moved = moved.max((xs[v] - x).abs());
            xs[v] = x;
        }
        moved
    }
}

impl Coord for QuadCoord {
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>> {
        let mut xs = vec![0.0; g.node_count()];
        for layer in layers {
            pack(layer, spacing, &mut xs);
        }

        for iteration in 0..self.iterations {
            let mut moved: f64 = 0.0;
            if iteration % 2 == 0 {
                for layer in layers {
                    moved = moved.max(Self::relax(g, layer, spacing, &mut xs));
                }
            } else {
                for layer in layers.iter().rev() {
                    moved = moved.max(Self::relax(g, layer, spacing, &mut xs));
                }
            }
            if moved < self.tolerance {
                tracing::trace!(iteration, "quadratic coordinates converged");
                break;
            }
        }
        Ok(xs)
    }
}
