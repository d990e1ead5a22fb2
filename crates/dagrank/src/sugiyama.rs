//! The layout driver: builder, layered pipeline, rank-axis remapping, flattening.

use crate::align::{AlignOptions, align_dag_y_by_rank};
use crate::builder::{Dag, connect, stratify};
use crate::config::{DEFAULT_GAP, DEFAULT_NODE_SIZE, LayoutConfig};
use crate::coord::{CoordStrategy, Spacing};
use crate::decross::DecrossStrategy;
use crate::error::Result;
use crate::layering::LayeringStrategy;
use crate::model::{GraphEdge, GraphNode, LayoutLink, LayoutNode, LayoutResult, NodeId, Point};
use crate::rank::{RankAccessor, resolve_rank};
use crate::strategy::Strategy;
use crate::sugi::{Sugi, VertexKind};
use std::fmt;

/// Runtime options of one layout call. Only the rank accessor is mandatory.
pub struct LayoutOptions<N> {
    pub rank: Box<dyn RankAccessor<N>>,
    /// Maps a rank to its y; defaults to uniform spacing by `gap[1]`.
    pub y_scale: Option<Box<dyn Fn(f64) -> f64>>,
    pub layering: LayeringStrategy,
    pub decross: DecrossStrategy,
    pub coord: CoordStrategy,
    /// Horizontal and vertical spacing.
    pub gap: [f64; 2],
    /// Node width and height.
    pub node_size: [f64; 2],
    pub debug: bool,
}

impl<N> LayoutOptions<N> {
    pub fn new(rank: impl RankAccessor<N> + 'static) -> Self {
        Self {
            rank: Box::new(rank),
            y_scale: None,
            layering: Strategy::default(),
            decross: Strategy::default(),
            coord: Strategy::default(),
            gap: DEFAULT_GAP,
            node_size: DEFAULT_NODE_SIZE,
            debug: false,
        }
    }

    pub fn from_config(config: &LayoutConfig, rank: impl RankAccessor<N> + 'static) -> Self {
        Self {
            layering: Strategy::from_optional_tag(config.layering.as_deref()),
            decross: Strategy::from_optional_tag(config.decross.as_deref()),
            coord: Strategy::from_optional_tag(config.coord.as_deref()),
            gap: config.gap,
            node_size: config.node_size,
            debug: config.debug,
            ..Self::new(rank)
        }
    }

    pub fn y_scale(mut self, scale: impl Fn(f64) -> f64 + 'static) -> Self {
        self.y_scale = Some(Box::new(scale));
        self
    }

    pub fn layering(mut self, layering: impl Into<LayeringStrategy>) -> Self {
        self.layering = layering.into();
        self
    }

    pub fn decross(mut self, decross: impl Into<DecrossStrategy>) -> Self {
        self.decross = decross.into();
        self
    }

    pub fn coord(mut self, coord: impl Into<CoordStrategy>) -> Self {
        self.coord = coord.into();
        self
    }

    pub fn gap(mut self, gap: [f64; 2]) -> Self {
        self.gap = gap;
        self
    }

    pub fn node_size(mut self, node_size: [f64; 2]) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<N> fmt::Debug for LayoutOptions<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("y_scale", &self.y_scale.as_ref().map(|_| ".."))
            .field("layering", &self.layering)
            .field("decross", &self.decross)
            .field("coord", &self.coord)
            .field("gap", &self.gap)
            .field("node_size", &self.node_size)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Lays out `nodes` connected by `links`, with the y axis following the caller's rank.
pub fn layout_dag_aligned<N: Clone, E: Clone>(
    nodes: &[GraphNode<N>],
    links: &[GraphEdge<E>],
    options: &LayoutOptions<N>,
) -> Result<LayoutResult<N, E>> {
    let dag = connect(nodes, links);
    run(dag, links, options)
}

/// Like [`layout_dag_aligned`], deriving links from each node's parent ids.
pub fn layout_stratified<N, F, I>(
    nodes: &[GraphNode<N>],
    parent_ids: F,
    options: &LayoutOptions<N>,
) -> Result<LayoutResult<N, ()>>
where
    N: Clone,
    F: Fn(&N) -> I,
    I: IntoIterator<Item = NodeId>,
{
    let (dag, links) = stratify(nodes, parent_ids);
    run(dag, &links, options)
}

fn run<N: Clone, E: Clone>(
    mut dag: Dag<'_, N>,
    links: &[GraphEdge<E>],
    options: &LayoutOptions<N>,
) -> Result<LayoutResult<N, E>> {
    if dag.nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }
    let [gap_x, gap_y] = options.gap;
    let [node_w, node_h] = options.node_size;

    let ranks: Vec<Option<f64>> = dag
        .nodes
        .iter()
        .map(|n| n.datum.and_then(|d| resolve_rank(options.rank.as_ref(), d)))
        .collect();
    let g = dag.layer_graph();
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        ranked = ranks.iter().flatten().count(),
        "layout input"
    );

    let node_layers = options.layering.resolve().layer(&g, &ranks)?;
    let sugi = Sugi::build(&g, &node_layers)?;
    tracing::debug!(
        strategy = options.layering.tag().unwrap_or("custom"),
        layers = sugi.layers.len(),
        vertices = sugi.graph.node_count(),
        "layering done"
    );

    let mut order = sugi.layers.clone();
    options.decross.resolve().decross(&sugi.graph, &mut order)?;
    tracing::debug!(
        strategy = options.decross.tag().unwrap_or("custom"),
        "crossing reduction done"
    );

    let widths: Vec<f64> = sugi
        .graph
        .nodes()
        .map(|(_, _, vertex)| match vertex.kind {
            VertexKind::Real(_) => node_w,
            VertexKind::Dummy(_) => 0.0,
        })
        .collect();
    let spacing = Spacing {
        widths: &widths,
        gap: gap_x,
    };
    let mut xs = options.coord.resolve().coord(&sugi.graph, &order, &spacing)?;
    tracing::debug!(
        strategy = options.coord.tag().unwrap_or("custom"),
        "coordinate assignment done"
    );

    let left = (0..xs.len())
        .map(|v| xs[v] - spacing.width(v) / 2.0)
        .fold(f64::INFINITY, f64::min);
    let mut width: f64 = 0.0;
    for (v, x) in xs.iter_mut().enumerate() {
        *x -= left;
        width = width.max(*x + spacing.width(v) / 2.0);
    }

    let layer_y = |layer: usize| node_h / 2.0 + layer as f64 * (node_h + gap_y);
    let vertex_point = |v: usize| {
        let layer = sugi.vertex(v).map_or(0, |vx| vx.layer);
        Point::new(xs[v], layer_y(layer))
    };
    for (ix, node) in dag.nodes.iter_mut().enumerate() {
        let p = vertex_point(ix);
        node.x = p.x;
        node.y = p.y;
        node.rank = ranks[ix];
    }
    for e in g.edges() {
        let chain = sugi.chains.get(e.ix).map_or(&[][..], Vec::as_slice);
        let mut points = Vec::with_capacity(chain.len() + 2);
        points.push(vertex_point(e.v));
        points.extend(chain.iter().map(|&d| vertex_point(d)));
        points.push(vertex_point(e.w));
        dag.links[*e.label].points = points;
    }
    for link in dag.links.iter_mut().filter(|l| l.is_self_loop()) {
        let p = vertex_point(link.source);
        link.points = vec![p, p];
    }

    let layer_count = sugi.layers.len() as f64;
    let mut height = layer_count * node_h + (layer_count - 1.0).max(0.0) * gap_y;
    let align_options = AlignOptions {
        y_scale: options.y_scale.as_deref(),
        gap_y,
        debug: options.debug,
    };
    match align_dag_y_by_rank(&mut dag, options.rank.as_ref(), &align_options) {
        Some(report) => {
            height = report.max_y - report.min_y + node_h;
            tracing::debug!(
                buckets = report.rows.len(),
                min_y = report.min_y,
                max_y = report.max_y,
                "rank alignment applied"
            );
        }
        None => tracing::debug!("no node resolved a rank, keeping layer spacing"),
    }

    Ok(flatten(dag, links, width, height))
}

/// Copies the DAG into owned output records.
fn flatten<N: Clone, E: Clone>(
    dag: Dag<'_, N>,
    links: &[GraphEdge<E>],
    width: f64,
    height: f64,
) -> LayoutResult<N, E> {
    let nodes: Vec<LayoutNode<N>> = dag
        .nodes
        .iter()
        .filter_map(|n| {
            Some(LayoutNode {
                id: n.id.clone(),
                data: n.datum?.clone(),
                x: n.x,
                y: n.y,
                rank: n.rank,
            })
        })
        .collect();
    let links: Vec<LayoutLink<E>> = dag
        .links
        .into_iter()
        .filter_map(|l| {
            let input = links.get(l.link)?;
            Some(LayoutLink {
                id: input.id.clone(),
                source: input.source.clone(),
                target: input.target.clone(),
                directed: input.directed,
                data: input.data.clone(),
                points: l.points,
            })
        })
        .collect();
    LayoutResult {
        nodes,
        links,
        width,
        height,
    }
}
