use super::Decross;
use super::cross_count::{cross_count, two_layer_cross_count_with};
use crate::error::{Error, Result};
use crate::sugi::SugiGraph;

/// Exact crossing minimisation by branch-and-bound over per-layer permutations.
///
/// The search space is the product of the layer sizes' factorials; inputs above `limit`
/// orderings are rejected with [`Error::DecrossTooLarge`] rather than searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptDecross {
    pub limit: u128,
}

impl OptDecross {
    pub const DEFAULT: Self = Self { limit: 100_000 };
}

impl Default for OptDecross {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn search_space(layers: &[Vec<usize>], limit: u128) -> u128 {
    let mut total: u128 = 1;
    for layer in layers {
        for k in 2..=layer.len() as u128 {
            total = total.saturating_mul(k);
            if total > limit {
                return total;
            }
        }
    }
    total
}

/// Lexicographic successor permutation; `false` once the last one was reached.
fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

struct Search<'a> {
    g: &'a SugiGraph,
    original: Vec<Vec<usize>>,
    current: Vec<Vec<usize>>,
    best: Vec<Vec<usize>>,
    best_cc: usize,
    scratch: Vec<usize>,
}

impl Search<'_> {
    fn descend(&mut self, i: usize, acc: usize) {
        if i == self.current.len() {
            if acc < self.best_cc {
                self.best_cc = acc;
                self.best.clone_from(&self.current);
            }
            return;
        }

        let mut perm: Vec<usize> = (0..self.original[i].len()).collect();
        loop {
            for (slot, &p) in perm.iter().enumerate() {
                self.current[i][slot] = self.original[i][p];
            }
            let cost = if i == 0 {
                0
            } else {
                two_layer_cross_count_with(
                    self.g,
                    &self.current[i - 1],
                    &self.current[i],
                    &mut self.scratch,
                )
            };
            if acc + cost < self.best_cc {
                self.descend(i + 1, acc + cost);
            }
            if self.best_cc == 0 || !next_permutation(&mut perm) {
                break;
            }
        }
    }
}

impl Decross for OptDecross {
    fn decross(&self, g: &SugiGraph, layers: &mut [Vec<usize>]) -> Result<()> {
        let orderings = search_space(layers, self.limit);
        if orderings > self.limit {
            return Err(Error::DecrossTooLarge {
                orderings,
                limit: self.limit,
            });
        }

        let best_cc = cross_count(g, layers);
        let mut search = Search {
            g,
            original: layers.to_vec(),
            current: layers.to_vec(),
            best: layers.to_vec(),
            best_cc,
            scratch: vec![0; g.node_count()],
        };
        if best_cc > 0 {
            search.descend(0, 0);
        }
        layers.clone_from_slice(&search.best);
        tracing::debug!(crossings = search.best_cc, orderings, "exact crossing reduction done");
        Ok(())
    }
}
