//! Rank-axis remapping.
//!
//! The layered pipeline spaces layers uniformly. [`align_dag_y_by_rank`] rewrites the y axis so
//! it follows the caller's rank (and optional scale) instead: every distinct y value becomes a
//! bucket, buckets holding a ranked node adopt that rank, the others get an inferred one, and the
//! scaled rank replaces the y of nodes and link points alike.

use crate::builder::Dag;
use crate::rank::{RankAccessor, resolve_rank};
use crate::util::quantize;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_GAP_Y: f64 = 40.0;

#[derive(Clone, Copy)]
pub struct AlignOptions<'a> {
    /// Maps a rank to its y; defaults to `(rank - min_rank) * gap_y`.
    pub y_scale: Option<&'a dyn Fn(f64) -> f64>,
    pub gap_y: f64,
    /// Emits one `debug` record per bucket.
    pub debug: bool,
}

impl Default for AlignOptions<'_> {
    fn default() -> Self {
        Self {
            y_scale: None,
            gap_y: DEFAULT_GAP_Y,
            debug: false,
        }
    }
}

impl fmt::Debug for AlignOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignOptions")
            .field("y_scale", &self.y_scale.map(|_| ".."))
            .field("gap_y", &self.gap_y)
            .field("debug", &self.debug)
            .finish()
    }
}

/// One y bucket of the remapping.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignRow {
    pub original_y: f64,
    pub rank: f64,
    pub mapped_y: f64,
    /// Whether the rank came from a node rather than inference.
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignReport {
    pub min_y: f64,
    pub max_y: f64,
    /// Buckets in ascending original y.
    pub rows: Vec<AlignRow>,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    y: f64,
    rank: Option<f64>,
}

/// Fills the unknown ranks of `buckets` (ascending y). At least one rank must be known.
fn infer_ranks(buckets: &[Bucket]) -> Vec<f64> {
    let mut ranks: Vec<f64> = vec![0.0; buckets.len()];
    let known: Vec<(usize, f64)> = buckets
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.rank.map(|r| (i, r)))
        .collect();
    let Some(&(first, first_rank)) = known.first() else {
        return ranks;
    };

    for (i, rank) in ranks.iter_mut().enumerate().take(first) {
        *rank = first_rank - (first - i) as f64;
    }
    for pair in known.windows(2) {
        let ((a, ra), (b, rb)) = (pair[0], pair[1]);
        ranks[a] = ra;
        let unknown = b - a - 1;
        let step = if rb > ra && ra + unknown as f64 >= rb {
            (rb - ra) / (unknown + 1) as f64
        } else {
            1.0
        };
        for j in 1..=unknown {
            ranks[a + j] = ra + j as f64 * step;
        }
    }
    if let Some(&(last, last_rank)) = known.last() {
        ranks[last] = last_rank;
        for (j, rank) in ranks.iter_mut().enumerate().skip(last + 1) {
            *rank = last_rank + (j - last) as f64;
        }
    }
    ranks
}

/// Rewrites the y of every node and link point of `dag` from the rank per y bucket.
///
/// Returns `None`, leaving `dag` untouched, when no node resolves to a finite rank. Values that
/// are not finite are left as they are.
pub fn align_dag_y_by_rank<N>(
    dag: &mut Dag<'_, N>,
    rank: &(impl RankAccessor<N> + ?Sized),
    options: &AlignOptions<'_>,
) -> Option<AlignReport> {
    let mut buckets: BTreeMap<i128, Bucket> = BTreeMap::new();
    let mut node_ranks: Vec<Option<f64>> = Vec::with_capacity(dag.nodes.len());
    for node in &dag.nodes {
        let resolved = node.datum.and_then(|d| resolve_rank(rank, d));
        node_ranks.push(resolved);
        if !node.y.is_finite() {
            continue;
        }
        let bucket = buckets.entry(quantize(node.y)).or_insert(Bucket {
            y: node.y,
            rank: None,
        });
        if bucket.rank.is_none() {
            bucket.rank = resolved;
        }
    }
    if buckets.values().all(|b| b.rank.is_none()) {
        return None;
    }
    for point in dag.links.iter().flat_map(|l| l.points.iter()) {
        if point.y.is_finite() {
            buckets.entry(quantize(point.y)).or_insert(Bucket {
                y: point.y,
                rank: None,
            });
        }
    }

    let ordered: Vec<(i128, Bucket)> = buckets.into_iter().collect();
    let plain: Vec<Bucket> = ordered.iter().map(|(_, b)| *b).collect();
    let ranks = infer_ranks(&plain);
    let min_rank = ranks.iter().copied().fold(f64::INFINITY, f64::min);
    let gap_y = options.gap_y;
    let default_scale = move |r: f64| (r - min_rank) * gap_y;

    let mut table: BTreeMap<i128, (f64, f64)> = BTreeMap::new();
    let mut rows: Vec<AlignRow> = Vec::with_capacity(ordered.len());
    for ((key, bucket), &r) in ordered.iter().zip(&ranks) {
        let mapped = match options.y_scale {
            Some(scale) => scale(r),
            None => default_scale(r),
        };
        table.insert(*key, (r, mapped));
        rows.push(AlignRow {
            original_y: bucket.y,
            rank: r,
            mapped_y: mapped,
            known: bucket.rank.is_some(),
        });
    }

    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut track = |y: f64| {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    };
    for (node, resolved) in dag.nodes.iter_mut().zip(node_ranks) {
        if !node.y.is_finite() {
            node.rank = resolved;
            continue;
        }
        if let Some(&(r, mapped)) = table.get(&quantize(node.y)) {
            node.y = mapped;
            node.rank = resolved.or(Some(r));
            track(mapped);
        }
    }
    for point in dag.links.iter_mut().flat_map(|l| l.points.iter_mut()) {
        if !point.y.is_finite() {
            continue;
        }
        if let Some(&(_, mapped)) = table.get(&quantize(point.y)) {
            point.y = mapped;
            track(mapped);
        }
    }

    if options.debug {
        for row in &rows {
            tracing::debug!(
                target: "dagrank::align",
                original_y = row.original_y,
                rank = row.rank,
                mapped_y = row.mapped_y,
                known = row.known,
                "rank bucket"
            );
        }
    }

    Some(AlignReport { min_y, max_y, rows })
}
