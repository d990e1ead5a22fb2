//! Layered ("proper") graph handed to the crossing-reduction and coordinate stages.
//!
//! Every edge spanning more than one layer is split into a chain of dummy vertices, one per
//! intermediate layer, so all edges of a [`SugiGraph`] connect adjacent layers.

use crate::error::{Error, Result};
use crate::graphlib::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// A DAG node (index into the layering graph).
    Real(usize),
    /// A chain vertex of the layering-graph edge with this index.
    Dummy(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub kind: VertexKind,
    pub layer: usize,
}

impl Vertex {
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, VertexKind::Dummy(_))
    }
}

pub type SugiGraph = Graph<Vertex, ()>;

/// Result of normalisation.
#[derive(Debug, Clone)]
pub struct Sugi {
    pub graph: SugiGraph,
    /// Vertex indices per layer, initially in vertex insertion order.
    pub layers: Vec<Vec<usize>>,
    /// Dummy chain (top to bottom) per layering-graph edge.
    pub chains: Vec<Vec<usize>>,
}

impl Sugi {
    /// Splits long edges of `g` given a layer per node. Real vertex `i` is node `i` of `g`.
    pub fn build<N, E>(g: &Graph<N, E>, node_layers: &[usize]) -> Result<Self> {
        let layer_count = node_layers.iter().copied().max().map_or(0, |m| m + 1);
        let mut graph: SugiGraph = Graph::with_capacity(g.node_count(), g.edge_count());
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];

        for (ix, id, _) in g.nodes() {
            let layer = node_layers.get(ix).copied().unwrap_or(0);
            let v = graph.set_node(
                id,
                Vertex {
                    kind: VertexKind::Real(ix),
                    layer,
                },
            );
            layers[layer].push(v);
        }

        let mut chains: Vec<Vec<usize>> = Vec::with_capacity(g.edge_count());
        for e in g.edges() {
            let from = node_layers.get(e.v).copied().unwrap_or(0);
            let to = node_layers.get(e.w).copied().unwrap_or(0);
            if to <= from {
                return Err(Error::InvalidLayering {
                    from: g.node_id(e.v).unwrap_or_default().to_string(),
                    to: g.node_id(e.w).unwrap_or_default().to_string(),
                });
            }

            let mut chain: Vec<usize> = Vec::with_capacity(to - from - 1);
            let mut prev = e.v;
            for layer in from + 1..to {
                // Leading NUL keeps dummy ids apart from ordinary node ids.
                let d = graph.set_node(
                    format!("\u{0}{}:{layer}", e.ix),
                    Vertex {
                        kind: VertexKind::Dummy(e.ix),
                        layer,
                    },
                );
                layers[layer].push(d);
                graph.add_edge(prev, d, ());
                chain.push(d);
                prev = d;
            }
            graph.add_edge(prev, e.w, ());
            chains.push(chain);
        }

        Ok(Self {
            graph,
            layers,
            chains,
        })
    }

    pub fn vertex(&self, v: usize) -> Option<&Vertex> {
        self.graph.node(v)
    }
}

/// Position of every vertex within its layer.
pub fn positions(graph: &SugiGraph, layers: &[Vec<usize>]) -> Vec<usize> {
    let mut pos = vec![0usize; graph.node_count()];
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
    pos
}
