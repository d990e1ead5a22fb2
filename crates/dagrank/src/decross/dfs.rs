use super::Decross;
use crate::error::Result;
use crate::graphlib::alg;
use crate::sugi::SugiGraph;

/// Orders every layer by depth-first preorder from the sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsDecross;

impl Decross for DfsDecross {
    fn decross(&self, g: &SugiGraph, layers: &mut [Vec<usize>]) -> Result<()> {
        dfs_order(g, layers);
        Ok(())
    }
}

pub(super) fn dfs_order(g: &SugiGraph, layers: &mut [Vec<usize>]) {
    let visit = alg::preorder(g, &g.sources());
    let mut rank = vec![usize::MAX; g.node_count()];
    for (i, v) in visit.into_iter().enumerate() {
        rank[v] = i;
    }
    for layer in layers.iter_mut() {
        layer.sort_by_key(|&v| rank[v]);
    }
}
