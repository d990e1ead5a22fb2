//! Graph container.
//!
//! Unlike a general purpose graphlib this container is directed-only and index based: every node
//! gets a dense `usize` index at insertion time, which the layout stages use to key their own
//! side tables (`Vec<f64>`, `Vec<usize>`, ...) instead of hashing ids over and over.

use rustc_hash::FxHashMap as HashMap;

pub mod alg;

pub use alg::CycleError;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    v: usize,
    w: usize,
    label: E,
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a, E> {
    pub ix: usize,
    pub v: usize,
    pub w: usize,
    pub label: &'a E,
}

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut node_index = HashMap::default();
        node_index.reserve(nodes);
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index,
            edges: Vec::with_capacity(edges),
            out_adj: Vec::with_capacity(nodes),
            in_adj: Vec::with_capacity(nodes),
        }
    }

    /// Inserts a node, or replaces the label of an existing one. Returns the node index.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> usize {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, ix);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        ix
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    pub fn node(&self, ix: usize) -> Option<&N> {
        self.nodes.get(ix).map(|n| &n.label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates `(index, id, label)` in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &str, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, n)| (ix, n.id.as_str(), &n.label))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds an edge between two existing node indices. Returns `None` when either endpoint is
    /// out of range.
    pub fn add_edge(&mut self, v: usize, w: usize, label: E) -> Option<usize> {
        if v >= self.nodes.len() || w >= self.nodes.len() {
            return None;
        }
        let ix = self.edges.len();
        self.edges.push(EdgeEntry { v, w, label });
        self.out_adj[v].push(ix);
        self.in_adj[w].push(ix);
        Some(ix)
    }

    /// Adds an edge by node id. Unknown endpoints are not created implicitly.
    pub fn set_edge(&mut self, v: &str, w: &str, label: E) -> Option<usize> {
        let v = self.node_ix(v)?;
        let w = self.node_ix(w)?;
        self.add_edge(v, w, label)
    }

    pub fn edge(&self, ix: usize) -> Option<EdgeRef<'_, E>> {
        self.edges.get(ix).map(|e| EdgeRef {
            ix,
            v: e.v,
            w: e.w,
            label: &e.label,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, E>> {
        self.edges.iter().enumerate().map(|(ix, e)| EdgeRef {
            ix,
            v: e.v,
            w: e.w,
            label: &e.label,
        })
    }

    /// Edge indices leaving `v`, in insertion order.
    pub fn out_edges(&self, v: usize) -> &[usize] {
        self.out_adj.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge indices entering `v`, in insertion order.
    pub fn in_edges(&self, v: usize) -> &[usize] {
        self.in_adj.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges(v).iter().map(|&e| self.edges[e].w)
    }

    pub fn predecessors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_edges(v).iter().map(|&e| self.edges[e].v)
    }

    pub fn out_degree(&self, v: usize) -> usize {
        self.out_edges(v).len()
    }

    pub fn in_degree(&self, v: usize) -> usize {
        self.in_edges(v).len()
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&v| self.in_adj[v].is_empty())
            .collect()
    }

    /// Nodes without outgoing edges, in insertion order.
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&v| self.out_adj[v].is_empty())
            .collect()
    }
}
