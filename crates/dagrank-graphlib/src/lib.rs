//! Graph container APIs used by `dagrank`.
//!
//! Nodes are addressed by a stable insertion index and carry a string id. Edges are stored in
//! insertion order and may be parallel; the layout stages decide how to merge them.

mod graph;

pub use graph::{CycleError, EdgeRef, Graph, alg};
