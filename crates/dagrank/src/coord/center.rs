use super::{Coord, Spacing, pack, packed_extent};
use crate::error::Result;
use crate::sugi::SugiGraph;

/// Packs every layer tightly and centres it on the widest layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterCoord;

impl Coord for CenterCoord {
    fn coord(&self, g: &SugiGraph, layers: &[Vec<usize>], spacing: &Spacing<'_>) -> Result<Vec<f64>> {
        let mut xs = vec![0.0; g.node_count()];
        for layer in layers {
            pack(layer, spacing, &mut xs);
        }
        let extents: Vec<f64> = layers
            .iter()
            .map(|layer| packed_extent(layer, spacing, &xs))
            .collect();
        let widest = extents.iter().copied().fold(0.0, f64::max);
        for (layer, extent) in layers.iter().zip(extents) {
            let offset = (widest - extent) / 2.0;
            for &v in layer {
                xs[v] += offset;
            }
        }
        Ok(xs)
    }
}
