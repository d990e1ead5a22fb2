//! Rank grid lines for an already positioned node set.
//!
//! [`map_ranks_to_y_positions`] averages the y of every rank and repairs the result into a
//! non-decreasing sequence; [`select_rank_lines`] thins it down to a bounded number of roughly
//! evenly spaced lines.

use crate::model::{LayoutNode, Point};
use crate::rank::{JsonField, LabelAccessor, RankAccessor};
use crate::util::{cmp_f64, quantize};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankPosition {
    pub rank: f64,
    pub y_position: f64,
    /// First label among the rank's nodes, or the rank itself.
    pub label: String,
}

/// Conventional rank and label of a positioned node.
pub trait GridNode {
    fn grid_rank(&self) -> Option<f64>;

    fn grid_label(&self) -> Option<String> {
        None
    }
}

impl<N> GridNode for LayoutNode<N> {
    fn grid_rank(&self) -> Option<f64> {
        self.rank
    }
}

impl GridNode for Value {
    fn grid_rank(&self) -> Option<f64> {
        RankAccessor::rank(&JsonField::rank(), self)
    }

    fn grid_label(&self) -> Option<String> {
        LabelAccessor::label(&JsonField::label(), self)
    }
}

/// Accessor overrides for [`map_ranks_to_y_positions`].
pub struct RankGridOptions<'a, T> {
    pub rank: Option<&'a dyn Fn(&T) -> Option<f64>>,
    pub label: Option<&'a dyn Fn(&T) -> Option<String>>,
}

impl<T> Default for RankGridOptions<'_, T> {
    fn default() -> Self {
        Self {
            rank: None,
            label: None,
        }
    }
}

pub fn map_ranks_to_y_positions<T: GridNode>(
    nodes: &[T],
    position: impl Fn(&T) -> Option<Point>,
    options: &RankGridOptions<'_, T>,
) -> Vec<RankPosition> {
    map_ranks_to_y_positions_with(
        nodes,
        position,
        |n: &T| match options.rank {
            Some(rank) => rank(n),
            None => n.grid_rank(),
        },
        |n: &T| match options.label {
            Some(label) => label(n),
            None => n.grid_label(),
        },
    )
}

struct Acc {
    rank: f64,
    sum: f64,
    count: usize,
    label: Option<String>,
}

/// [`map_ranks_to_y_positions`] for node types without a [`GridNode`] impl.
pub fn map_ranks_to_y_positions_with<T>(
    nodes: &[T],
    position: impl Fn(&T) -> Option<Point>,
    rank: impl Fn(&T) -> Option<f64>,
    label: impl Fn(&T) -> Option<String>,
) -> Vec<RankPosition> {
    let mut by_rank: BTreeMap<i128, Acc> = BTreeMap::new();
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for node in nodes {
        let Some(r) = rank(node).filter(|r| r.is_finite()) else {
            continue;
        };
        let Some(p) = position(node).filter(|p| p.x.is_finite() && p.y.is_finite()) else {
            continue;
        };
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);

        let acc = by_rank.entry(quantize(r)).or_insert(Acc {
            rank: r,
            sum: 0.0,
            count: 0,
            label: None,
        });
        acc.sum += p.y;
        acc.count += 1;
        if acc.label.is_none() {
            acc.label = label(node);
        }
    }

    let mut out: Vec<RankPosition> = by_rank
        .into_values()
        .map(|acc| RankPosition {
            rank: acc.rank,
            y_position: acc.sum / acc.count as f64,
            label: acc.label.unwrap_or_else(|| acc.rank.to_string()),
        })
        .collect();

    let unordered = out
        .windows(2)
        .any(|pair| pair[1].y_position <= pair[0].y_position);
    if unordered {
        repair(&mut out, min_y, max_y);
    }
    out
}

/// Forward pass making `ranks` non-decreasing in y; ties stay.
fn repair(ranks: &mut [RankPosition], min_y: f64, max_y: f64) {
    let Some((first, rest)) = ranks.split_first_mut() else {
        return;
    };
    first.y_position = first.y_position.min(min_y);
    let mut prev = first.y_position;

    let Some((last, interior)) = rest.split_last_mut() else {
        return;
    };
    for r in interior {
        if r.y_position <= prev {
            r.y_position = prev;
        }
        prev = r.y_position;
    }
    last.y_position = last.y_position.max(prev).max(max_y);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOptions {
    pub y_min: f64,
    pub y_max: f64,
    pub max_count: usize,
}

/// Index of the closest unused entry to `target`, scanning outward from the insertion point.
/// Ties go to the lower index.
fn nearest_unused(ys: &[f64], used: &[bool], target: f64) -> Option<usize> {
    let ins = ys.partition_point(|&y| y < target);
    let distance = |i: usize| (ys[i] - target).abs();
    for radius in 0..=ys.len() {
        let lo = ins.checked_sub(radius + 1).filter(|&i| !used[i]);
        let hi = Some(ins + radius).filter(|&i| i < ys.len() && !used[i]);
        match (lo, hi) {
            (Some(l), Some(h)) => return Some(if distance(h) < distance(l) { h } else { l }),
            (Some(l), None) => return Some(l),
            (None, Some(h)) => return Some(h),
            (None, None) => {}
        }
    }
    None
}

/// Up to `max_count` ranks inside `[y_min, y_max]`, spread evenly across it.
///
/// Non-finite bounds or a zero count select nothing.
pub fn select_rank_lines(ranks: &[RankPosition], options: &SelectOptions) -> Vec<RankPosition> {
    let SelectOptions {
        y_min,
        y_max,
        max_count,
    } = *options;
    if !y_min.is_finite() || !y_max.is_finite() || max_count == 0 {
        return Vec::new();
    }
    let (lo, hi) = (y_min.min(y_max), y_min.max(y_max));

    let mut inside: Vec<&RankPosition> = ranks
        .iter()
        .filter(|r| r.y_position >= lo && r.y_position <= hi)
        .collect();
    inside.sort_by(|a, b| cmp_f64(a.y_position, b.y_position));
    if inside.len() <= max_count {
        return inside.into_iter().cloned().collect();
    }

    let ys: Vec<f64> = inside.iter().map(|r| r.y_position).collect();
    let (first, last) = (ys[0], ys[ys.len() - 1]);
    let ratios: Vec<f64> = if max_count == 1 {
        vec![0.5]
    } else {
        (0..max_count)
            .map(|i| i as f64 / (max_count - 1) as f64)
            .collect()
    };

    let mut used = vec![false; ys.len()];
    let mut chosen: Vec<usize> = Vec::with_capacity(max_count);
    for ratio in ratios {
        let target = first + ratio * (last - first);
        let pick = nearest_unused(&ys, &used, target).or_else(|| used.iter().position(|u| !u));
        if let Some(i) = pick {
            used[i] = true;
            chosen.push(i);
        }
    }
    for i in 0..ys.len() {
        if chosen.len() >= max_count {
            break;
        }
        if !used[i] {
            used[i] = true;
            chosen.push(i);
        }
    }

    chosen.sort_unstable();
    chosen.into_iter().map(|i| inside[i].clone()).collect()
}
