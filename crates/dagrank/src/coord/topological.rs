use super::{Coord, Spacing};
use crate::error::{Error, Result};
use crate::sugi::{SugiGraph, VertexKind};
use std::collections::BTreeMap;

/// Column layout for topological layerings: real vertices share one column, each long edge runs
/// on its own lane to the right. Lanes are reused once an edge has ended (interval colouring).
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalCoord;

impl Coord for TopologicalCoord {
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>> {
        let mut widest: f64 = 0.0;
        for (layer_ix, layer) in layers.iter().enumerate() {
            let mut reals = 0usize;
            for &v in layer {
                if g.node(v).is_some_and(|n| !n.is_dummy()) {
                    reals += 1;
                    widest = widest.max(spacing.width(v));
                }
            }
            if reals > 1 {
                return Err(Error::NotTopological { layer: layer_ix });
            }
        }

        // Layer span and vertices of every dummy chain, keyed by layering edge.
        let mut spans: BTreeMap<usize, (usize, usize, Vec<usize>)> = BTreeMap::new();
        for (v, _, vertex) in g.nodes() {
            if let VertexKind::Dummy(edge) = vertex.kind {
                let span = spans
                    .entry(edge)
                    .or_insert((vertex.layer, vertex.layer, Vec::new()));
                span.0 = span.0.min(vertex.layer);
                span.1 = span.1.max(vertex.layer);
                span.2.push(v);
            }
        }

        let mut chains: Vec<(usize, usize, Vec<usize>)> = spans.into_values().collect();
        chains.sort_by_key(|(start, end, _)| (*start, *end));

        let mut xs = vec![0.0; g.node_count()];
        let mut lane_ends: Vec<usize> = Vec::new();
        for (start, end, vertices) in chains {
            let lane = match lane_ends.iter().position(|&last| last < start) {
                Some(lane) => {
                    lane_ends[lane] = end;
                    lane
                }
                None => {
                    lane_ends.push(end);
                    lane_ends.len() - 1
                }
            };
            let x = widest / 2.0 + (lane + 1) as f64 * spacing.gap;
            for v in vertices {
                xs[v] = x;
            }
        }
        Ok(xs)
    }
}
