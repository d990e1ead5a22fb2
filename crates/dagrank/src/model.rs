//! Input and output records of the layout engine.
//!
//! Inputs are borrowed for the duration of one layout call. Outputs are owned plain records: the
//! caller's datum is cloned next to the computed geometry, nothing references engine internals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier: either a string or an integer.
///
/// Ids are compared by their display form when building the graph, so `NodeId::Int(1)` and
/// `NodeId::Str("1")` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode<N> {
    pub id: NodeId,
    pub data: N,
}

impl<N> GraphNode<N> {
    pub fn new(id: impl Into<NodeId>, data: N) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge<E> {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub data: E,
}

fn default_directed() -> bool {
    true
}

impl<E> GraphEdge<E> {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        data: E,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            directed: true,
            data,
        }
    }

    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A positioned node: the caller's datum plus coordinates and the resolved (or inferred) rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode<N> {
    pub id: NodeId,
    pub data: N,
    pub x: f64,
    pub y: f64,
    pub rank: Option<f64>,
}

/// A routed link. `points` runs from the source centre through every intermediate layer to the
/// target centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutLink<E> {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub directed: bool,
    pub data: E,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult<N, E> {
    pub nodes: Vec<LayoutNode<N>>,
    pub links: Vec<LayoutLink<E>>,
    pub width: f64,
    pub height: f64,
}

impl<N, E> LayoutResult<N, E> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&LayoutNode<N>> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
