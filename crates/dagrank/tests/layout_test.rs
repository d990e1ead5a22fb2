use dagrank::decross::OptDecross;
use dagrank::{
    DecrossStrategy, Error, GraphEdge, GraphNode, JsonField, LayoutOptions, LayoutResult, NodeId,
    layout_dag_aligned, layout_stratified,
};
use serde_json::{Value, json};

fn node(id: &str, data: Value) -> GraphNode<Value> {
    GraphNode::new(id, data)
}

fn link(source: &str, target: &str) -> GraphEdge<()> {
    GraphEdge::new(format!("{source}-{target}"), source, target, ())
}

fn ranked(ranks: &[(&str, i64)]) -> Vec<GraphNode<Value>> {
    ranks
        .iter()
        .map(|&(id, rank)| node(id, json!({ "rank": rank })))
        .collect()
}

fn options() -> LayoutOptions<Value> {
    LayoutOptions::new(JsonField::rank())
}

fn y_of<E>(result: &LayoutResult<Value, E>, id: &str) -> f64 {
    result.node(&NodeId::from(id)).map(|n| n.y).unwrap_or(f64::NAN)
}

#[test]
fn chain_is_aligned_to_its_ranks() {
    let nodes = ranked(&[("a", 0), ("b", 1), ("c", 2)]);
    let links = vec![link("a", "b"), link("b", "c")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();

    assert_eq!(out.nodes.len(), 3);
    for n in &out.nodes {
        assert_eq!(n.x, 0.5);
    }
    assert_eq!(y_of(&out, "a"), 0.0);
    assert_eq!(y_of(&out, "b"), 40.0);
    assert_eq!(y_of(&out, "c"), 80.0);
    assert_eq!(out.width, 1.0);
    assert_eq!(out.height, 81.0);

    let ab = &out.links[0];
    assert_eq!(ab.id, "a-b");
    assert_eq!(ab.points.len(), 2);
    assert_eq!((ab.points[0].y, ab.points[1].y), (0.0, 40.0));
    assert!(ab.directed);
}

#[test]
fn rank_gaps_follow_the_rank_not_the_layer() {
    let nodes = ranked(&[("a", 0), ("b", 10)]);
    let links = vec![link("a", "b")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    assert_eq!(y_of(&out, "b"), 400.0);
    assert_eq!(out.node(&NodeId::from("b")).and_then(|n| n.rank), Some(10.0));
}

#[test]
fn unranked_nodes_get_an_inferred_rank() {
    let nodes = vec![
        node("a", json!({ "rank": 0 })),
        node("b", json!({})),
        node("c", json!({ "rank": 5 })),
    ];
    let links = vec![link("a", "b"), link("b", "c")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    assert_eq!(y_of(&out, "b"), 40.0);
    assert_eq!(y_of(&out, "c"), 200.0);
    assert_eq!(out.node(&NodeId::from("b")).and_then(|n| n.rank), Some(1.0));
    assert_eq!(out.height, 201.0);
}

#[test]
fn long_edges_route_through_every_layer() {
    let nodes = ranked(&[("a", 0), ("b", 1), ("c", 2)]);
    let links = vec![link("a", "b"), link("b", "c"), link("a", "c")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();

    let ac = out.links.iter().find(|l| l.id == "a-c").unwrap();
    let ys: Vec<f64> = ac.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![0.0, 40.0, 80.0]);
    let b = out.node(&NodeId::from("b")).unwrap();
    assert!((ac.points[1].x - b.x).abs() >= 0.5 + 24.0 - 1e-9);
}

#[test]
fn custom_scale_is_applied() {
    let nodes = ranked(&[("a", 1), ("b", 2), ("c", 4)]);
    let links = vec![link("a", "b"), link("b", "c")];
    let opts = options().y_scale(|r| r * 100.0);
    let out = layout_dag_aligned(&nodes, &links, &opts).unwrap();
    assert_eq!(y_of(&out, "a"), 100.0);
    assert_eq!(y_of(&out, "b"), 200.0);
    assert_eq!(y_of(&out, "c"), 400.0);
}

#[test]
fn equal_ranks_share_a_row() {
    let nodes = ranked(&[("root", 0), ("l", 1), ("r", 1), ("leaf", 2)]);
    let links = vec![
        link("root", "l"),
        link("root", "r"),
        link("l", "leaf"),
        link("r", "leaf"),
    ];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    assert_eq!(y_of(&out, "l"), y_of(&out, "r"));
    let l = out.node(&NodeId::from("l")).unwrap();
    let r = out.node(&NodeId::from("r")).unwrap();
    assert!((l.x - r.x).abs() >= 25.0 - 1e-9);
}

#[test]
fn without_ranks_layers_keep_their_spacing() {
    let nodes = vec![node("a", json!({})), node("b", json!({})), node("c", json!({}))];
    let links = vec![link("a", "b"), link("b", "c")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    assert_eq!(y_of(&out, "a"), 0.5);
    assert_eq!(y_of(&out, "b"), 41.5);
    assert_eq!(y_of(&out, "c"), 82.5);
    assert_eq!(out.height, 83.0);
    assert!(out.nodes.iter().all(|n| n.rank.is_none()));
}

#[test]
fn cycles_surface_as_errors() {
    let nodes = ranked(&[("a", 0), ("b", 1)]);
    let links = vec![link("a", "b"), link("b", "a")];
    let err = layout_dag_aligned(&nodes, &links, &options()).unwrap_err();
    assert!(matches!(err, Error::Cycle { .. }), "{err}");
}

#[test]
fn contradicting_ranks_are_rejected() {
    let nodes = ranked(&[("a", 2), ("b", 1)]);
    let links = vec![link("a", "b")];
    let err = layout_dag_aligned(&nodes, &links, &options()).unwrap_err();
    assert_eq!(
        err,
        Error::RankConflict {
            from: "a".to_string(),
            to: "b".to_string()
        }
    );
}

#[test]
fn dangling_links_and_self_loops() {
    let nodes = ranked(&[("a", 0), ("b", 1)]);
    let links = vec![link("a", "b"), link("a", "ghost"), link("b", "b")];
    let out = layout_dag_aligned(&nodes, &links, &options()).unwrap();

    let ids: Vec<&str> = out.links.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["a-b", "b-b"]);
    let lp = &out.links[1];
    assert_eq!(lp.points.len(), 2);
    assert_eq!(lp.points[0], lp.points[1]);
    assert_eq!(lp.points[0].y, y_of(&out, "b"));
}

#[test]
fn empty_input_gives_an_empty_layout() {
    let out = layout_dag_aligned::<Value, ()>(&[], &[], &options()).unwrap();
    assert_eq!(out, LayoutResult::empty());
}

#[test]
fn stratified_input_derives_links_from_parents() {
    let nodes = vec![
        node("a", json!({ "rank": 0, "parents": [] })),
        node("b", json!({ "rank": 1, "parents": ["a"] })),
        node("c", json!({ "rank": 2, "parents": ["a", "b"] })),
    ];
    let parents = |d: &Value| -> Vec<NodeId> {
        d["parents"]
            .as_array()
            .map(|ps| ps.iter().filter_map(Value::as_str).map(NodeId::from).collect())
            .unwrap_or_default()
    };
    let out = layout_stratified(&nodes, parents, &options()).unwrap();
    let ids: Vec<&str> = out.links.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["a->b", "a->c", "b->c"]);
    assert_eq!(y_of(&out, "c"), 80.0);
}

#[test]
fn topological_layout_uses_one_column_and_side_lanes() {
    let nodes = vec![node("a", json!({})), node("b", json!({})), node("c", json!({}))];
    let links = vec![link("a", "b"), link("b", "c"), link("a", "c")];
    let opts = options().layering("topological").coord("topological");
    let out = layout_dag_aligned(&nodes, &links, &opts).unwrap();

    for n in &out.nodes {
        assert_eq!(n.x, 0.5);
    }
    let ac = out.links.iter().find(|l| l.id == "a-c").unwrap();
    assert_eq!(ac.points.len(), 3);
    assert_eq!(ac.points[1].x, 25.0);
    assert_eq!(out.width, 25.0);
}

#[test]
fn topological_coordinates_need_one_node_per_layer() {
    let nodes = ranked(&[("a", 0), ("b", 0)]);
    let opts = options().coord("topological");
    let err = layout_dag_aligned::<Value, ()>(&nodes, &[], &opts).unwrap_err();
    assert_eq!(err, Error::NotTopological { layer: 0 });
}

#[test]
fn exact_crossing_reduction_has_a_limit() {
    let nodes = ranked(&[("a", 0), ("b", 0), ("c", 0)]);
    let opts = options().decross(DecrossStrategy::Custom(Box::new(OptDecross { limit: 2 })));
    let err = layout_dag_aligned::<Value, ()>(&nodes, &[], &opts).unwrap_err();
    assert_eq!(
        err,
        Error::DecrossTooLarge {
            orderings: 6,
            limit: 2
        }
    );
}

#[test]
fn every_strategy_combination_lays_out_a_diamond() {
    let nodes = ranked(&[("s", 0), ("x", 1), ("y", 1), ("z", 1), ("t", 3)]);
    let links = vec![
        link("s", "x"),
        link("s", "y"),
        link("s", "z"),
        link("x", "t"),
        link("z", "t"),
        link("s", "t"),
    ];
    for layering in ["simplex", "longestPath"] {
        for decross in ["twoLayer", "opt", "dfs"] {
            for coord in ["simplex", "greedy", "quad", "center"] {
                let opts = options().layering(layering).decross(decross).coord(coord);
                let out = layout_dag_aligned(&nodes, &links, &opts)
                    .unwrap_or_else(|e| panic!("{layering}/{decross}/{coord}: {e}"));
                assert_eq!(y_of(&out, "t"), 120.0);
                let mut xs: Vec<f64> = ["x", "y", "z"]
                    .iter()
                    .map(|id| out.node(&NodeId::from(*id)).map(|n| n.x).unwrap_or(f64::NAN))
                    .collect();
                xs.sort_by(f64::total_cmp);
                assert!(xs[1] - xs[0] >= 25.0 - 1e-6, "{layering}/{decross}/{coord}: {xs:?}");
                assert!(xs[2] - xs[1] >= 25.0 - 1e-6, "{layering}/{decross}/{coord}: {xs:?}");
                assert!(out.nodes.iter().all(|n| n.x >= 0.5 - 1e-9));
            }
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let nodes = ranked(&[("a", 0), ("b", 1), ("c", 1), ("d", 2), ("e", 3)]);
    let links = vec![
        link("a", "b"),
        link("a", "c"),
        link("b", "d"),
        link("c", "e"),
        link("a", "e"),
    ];
    let first = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    let second = layout_dag_aligned(&nodes, &links, &options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn topological_layering_keeps_ranks_in_order() {
    let nodes = vec![
        node("a", json!({ "rank": 0 })),
        node("b", json!({})),
        node("c", json!({ "rank": 2 })),
        node("d", json!({ "rank": 3 })),
    ];
    let links = vec![link("a", "b"), link("b", "c")];
    let opts = options().layering("topological");
    let out = layout_dag_aligned(&nodes, &links, &opts).unwrap();

    assert_eq!(y_of(&out, "a"), 0.0);
    assert_eq!(y_of(&out, "b"), 40.0);
    assert_eq!(y_of(&out, "c"), 80.0);
    assert_eq!(y_of(&out, "d"), 120.0);
    let bc = out.links.iter().find(|l| l.id == "b-c").unwrap();
    let ys: Vec<f64> = bc.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![40.0, 80.0]);
}

#[test]
fn topological_layering_shares_a_row_for_equal_ranks() {
    let nodes = ranked(&[("a", 1), ("b", 1), ("c", 2)]);
    let opts = options().layering("topological");
    let out = layout_dag_aligned::<Value, ()>(&nodes, &[], &opts).unwrap();

    assert_eq!(y_of(&out, "a"), y_of(&out, "b"));
    assert_eq!(y_of(&out, "c"), 40.0);
    let a = out.node(&NodeId::from("a")).unwrap();
    let b = out.node(&NodeId::from("b")).unwrap();
    assert!((a.x - b.x).abs() >= 25.0 - 1e-9);

    // A single column cannot hold two nodes of one rank.
    let opts = options().layering("topological").coord("topological");
    let err = layout_dag_aligned::<Value, ()>(&nodes, &[], &opts).unwrap_err();
    assert_eq!(err, Error::NotTopological { layer: 0 });
}

#[test]
fn epoch_millisecond_ranks_are_not_merged() {
    let t = 1.7e12;
    let nodes = vec![
        node("a", json!({ "rank": t })),
        node("b", json!({ "rank": t + 1000.0 })),
    ];
    let links = vec![link("a", "b")];
    let opts = options().y_scale(move |r| (r - t) / 1000.0 * 40.0);
    let out = layout_dag_aligned(&nodes, &links, &opts).unwrap();

    assert_eq!(y_of(&out, "a"), 0.0);
    assert_eq!(y_of(&out, "b"), 40.0);
    assert_eq!(out.node(&NodeId::from("b")).and_then(|n| n.rank), Some(t + 1000.0));
}
