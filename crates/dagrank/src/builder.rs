//! DAG construction from flat node/link lists.
//!
//! The builder never fails: links with an unknown endpoint are dropped (and logged), duplicate
//! node ids keep their first occurrence. Acyclicity is not checked here; the layering stage
//! reports cycles.

use crate::graphlib::Graph;
use crate::model::{GraphEdge, GraphNode, NodeId, Point};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// A node of the transient DAG built for one layout call.
#[derive(Debug, Clone, PartialEq)]
pub struct DagNode<'a, N> {
    pub id: NodeId,
    /// The originating input datum, if any.
    pub datum: Option<&'a N>,
    pub x: f64,
    pub y: f64,
    /// Rank assigned by the rank-axis remapper (known or inferred).
    pub rank: Option<f64>,
}

/// A link of the transient DAG. `source`/`target` index into [`Dag::nodes`]; `link` indexes the
/// caller's link list.
#[derive(Debug, Clone, PartialEq)]
pub struct DagLink {
    pub source: usize,
    pub target: usize,
    pub link: usize,
    pub points: Vec<Point>,
}

impl DagLink {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dag<'a, N> {
    pub nodes: Vec<DagNode<'a, N>>,
    pub links: Vec<DagLink>,
}

impl<'a, N> Default for Dag<'a, N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl<'a, N> Dag<'a, N> {
    /// Adds a node without datum checks; returns its index.
    pub fn push_node(&mut self, id: impl Into<NodeId>, datum: Option<&'a N>, x: f64, y: f64) -> usize {
        self.nodes.push(DagNode {
            id: id.into(),
            datum,
            x,
            y,
            rank: None,
        });
        self.nodes.len() - 1
    }

    pub fn push_link(&mut self, source: usize, target: usize, points: Vec<Point>) -> usize {
        let link = self.links.len();
        self.links.push(DagLink {
            source,
            target,
            link,
            points,
        });
        link
    }

    /// The structure the layering stage works on: one graph node per DAG node (same index), one
    /// edge per non-self-loop link labelled with the link's index in [`Dag::links`].
    pub fn layer_graph(&self) -> Graph<(), usize> {
        let mut g: Graph<(), usize> = Graph::with_capacity(self.nodes.len(), self.links.len());
        for n in &self.nodes {
            g.set_node(n.id.to_string(), ());
        }
        for (ix, l) in self.links.iter().enumerate() {
            if l.is_self_loop() {
                continue;
            }
            g.add_edge(l.source, l.target, ix);
        }
        g
    }
}

/// Builds the DAG by explicit edge connection.
pub fn connect<'a, N, E>(nodes: &'a [GraphNode<N>], links: &[GraphEdge<E>]) -> Dag<'a, N> {
    let mut dag: Dag<'a, N> = Dag {
        nodes: Vec::with_capacity(nodes.len()),
        links: Vec::with_capacity(links.len()),
    };
    let mut index: IndexMap<String, usize> = IndexMap::with_capacity(nodes.len());

    for node in nodes {
        match index.entry(node.id.to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(id = %node.id, "duplicate node id ignored");
            }
            Entry::Vacant(slot) => {
                slot.insert(dag.nodes.len());
                dag.nodes.push(DagNode {
                    id: node.id.clone(),
                    datum: Some(&node.data),
                    x: 0.0,
                    y: 0.0,
                    rank: None,
                });
            }
        }
    }

    for (ix, link) in links.iter().enumerate() {
        let source = index.get(&link.source.to_string()).copied();
        let target = index.get(&link.target.to_string()).copied();
        let (Some(source), Some(target)) = (source, target) else {
            tracing::debug!(
                link = %link.id,
                source = %link.source,
                target = %link.target,
                "link with unknown endpoint omitted"
            );
            continue;
        };
        dag.links.push(DagLink {
            source,
            target,
            link: ix,
            points: Vec::new(),
        });
    }

    dag
}

/// Derives links from parent ids: every `(parent, child)` pair becomes a link with id
/// `"{parent}->{child}"`.
pub fn stratify_links<N, F, I>(nodes: &[GraphNode<N>], parent_ids: F) -> Vec<GraphEdge<()>>
where
    F: Fn(&N) -> I,
    I: IntoIterator<Item = NodeId>,
{
    let mut links: Vec<GraphEdge<()>> = Vec::new();
    for node in nodes {
        for parent in parent_ids(&node.data) {
            links.push(GraphEdge::new(
                format!("{parent}->{}", node.id),
                parent,
                node.id.clone(),
                (),
            ));
        }
    }
    links
}

/// Builds the DAG by parent/child derivation. The derived links are returned alongside because
/// the DAG only stores indices into them.
pub fn stratify<'a, N, F, I>(nodes: &'a [GraphNode<N>], parent_ids: F) -> (Dag<'a, N>, Vec<GraphEdge<()>>)
where
    F: Fn(&N) -> I,
    I: IntoIterator<Item = NodeId>,
{
    let links = stratify_links(nodes, parent_ids);
    let dag = connect(nodes, &links);
    (dag, links)
}
