use super::Decross;
use super::cross_count::cross_count;
use super::dfs::dfs_order;
use crate::error::Result;
use crate::sugi::{SugiGraph, positions};
use crate::util::cmp_f64;

/// How neighbour positions are combined into a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregator {
    /// Barycenter.
    #[default]
    Mean,
    Median,
}

impl Aggregator {
    fn aggregate(self, values: &mut [f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Self::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            Self::Median => {
                values.sort_by(|a, b| cmp_f64(*a, *b));
                let mid = values.len() / 2;
                if values.len() % 2 == 1 {
                    Some(values[mid])
                } else {
                    Some((values[mid - 1] + values[mid]) / 2.0)
                }
            }
        }
    }
}

/// Layer-sweep heuristic: alternating down/up sweeps, each reordering one layer against its
/// fixed neighbour layer. The ordering with the fewest crossings seen is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoLayerDecross {
    pub passes: usize,
    pub aggregator: Aggregator,
}

impl TwoLayerDecross {
    pub const DEFAULT: Self = Self {
        passes: 24,
        aggregator: Aggregator::Mean,
    };
}

impl Default for TwoLayerDecross {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Down,
    Up,
}

impl TwoLayerDecross {
    fn reorder(&self, g: &SugiGraph, layers: &mut [Vec<usize>], i: usize, sweep: Sweep) {
        let pos = positions(g, layers);
        let mut values: Vec<f64> = Vec::new();
        let keys: Vec<Option<f64>> = layers[i]
            .iter()
            .map(|&v| {
                values.clear();
                match sweep {
                    Sweep::Down => values.extend(g.predecessors(v).map(|u| pos[u] as f64)),
                    Sweep::Up => values.extend(g.successors(v).map(|w| pos[w] as f64)),
                }
                self.aggregator.aggregate(&mut values)
            })
            .collect();

        // Vertices without neighbours keep their slot; the others are sorted into the rest.
        let mut movable: Vec<(f64, usize, usize)> = layers[i]
            .iter()
            .enumerate()
            .filter_map(|(slot, &v)| keys[slot].map(|k| (k, slot, v)))
            .collect();
        movable.sort_by(|a, b| cmp_f64(a.0, b.0).then(a.1.cmp(&b.1)));

        let mut next = movable.into_iter();
        for slot in 0..layers[i].len() {
            if keys[slot].is_some() {
                if let Some((_, _, v)) = next.next() {
                    layers[i][slot] = v;
                }
            }
        }
    }
}

impl Decross for TwoLayerDecross {
    fn decross(&self, g: &SugiGraph, layers: &mut [Vec<usize>]) -> Result<()> {
        dfs_order(g, layers);
        let mut best: Vec<Vec<usize>> = layers.to_vec();
        let mut best_cc = cross_count(g, layers);

        for pass in 0..self.passes {
            if best_cc == 0 {
                break;
            }
            if pass % 2 == 0 {
                for i in 1..layers.len() {
                    self.reorder(g, layers, i, Sweep::Down);
                }
            } else {
                for i in (0..layers.len().saturating_sub(1)).rev() {
                    self.reorder(g, layers, i, Sweep::Up);
                }
            }
            let cc = cross_count(g, layers);
            if cc < best_cc {
                best_cc = cc;
                best = layers.to_vec();
            }
        }

        layers.clone_from_slice(&best);
        tracing::debug!(crossings = best_cc, "two-layer crossing reduction done");
        Ok(())
    }
}
