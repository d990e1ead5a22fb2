use dagrank::coord::{CenterCoord, GreedyCoord, QuadCoord, SimplexCoord, Spacing, TopologicalCoord};
use dagrank::graphlib::Graph;
use dagrank::sugi::Sugi;
use dagrank::{Coord, Error};

fn sugi(nodes: &[&str], edges: &[(&str, &str)], layers: &[usize]) -> Sugi {
    let mut g: Graph<(), ()> = Graph::new();
    for id in nodes {
        g.set_node(*id, ());
    }
    for (v, w) in edges {
        g.set_edge(v, w, ());
    }
    Sugi::build(&g, layers).unwrap()
}

fn widths(s: &Sugi, real: f64) -> Vec<f64> {
    s.graph
        .nodes()
        .map(|(_, _, v)| if v.is_dummy() { 0.0 } else { real })
        .collect()
}

fn assert_separated(s: &Sugi, xs: &[f64], spacing: &Spacing<'_>) {
    for layer in &s.layers {
        for pair in layer.windows(2) {
            let need = spacing.separation(pair[0], pair[1]);
            let got = xs[pair[1]] - xs[pair[0]];
            assert!(got >= need - 1e-6, "{got} < {need}");
        }
    }
}

/// Two parents of one child, plus an edge skipping a layer.
fn fork() -> Sugi {
    sugi(
        &["a", "b", "c", "d"],
        &[("a", "c"), ("b", "c"), ("c", "d"), ("a", "d")],
        &[0, 0, 1, 2],
    )
}

#[test]
fn all_strategies_respect_separation() {
    let s = fork();
    let w = widths(&s, 4.0);
    let spacing = Spacing {
        widths: &w,
        gap: 10.0,
    };
    let strategies: Vec<Box<dyn Coord>> = vec![
        Box::new(SimplexCoord),
        Box::new(GreedyCoord),
        Box::new(QuadCoord::DEFAULT),
        Box::new(CenterCoord),
    ];
    for strategy in strategies {
        let xs = strategy.coord(&s.graph, &s.layers, &spacing).unwrap();
        assert_eq!(xs.len(), s.graph.node_count());
        assert!(xs.iter().all(|x| x.is_finite()));
        assert_separated(&s, &xs, &spacing);
    }
}

#[test]
fn simplex_straightens_chains() {
    let s = sugi(&["a", "b", "c"], &[("a", "b"), ("b", "c")], &[0, 1, 2]);
    let w = widths(&s, 1.0);
    let spacing = Spacing {
        widths: &w,
        gap: 24.0,
    };
    let xs = SimplexCoord.coord(&s.graph, &s.layers, &spacing).unwrap();
    assert_eq!(xs[0], xs[1]);
    assert_eq!(xs[1], xs[2]);
}

#[test]
fn center_and_quad_put_a_child_between_its_parents() {
    let s = sugi(&["a", "b", "c"], &[("a", "c"), ("b", "c")], &[0, 0, 1]);
    let w = widths(&s, 1.0);
    let spacing = Spacing {
        widths: &w,
        gap: 24.0,
    };

    let xs = CenterCoord.coord(&s.graph, &s.layers, &spacing).unwrap();
    assert_eq!(xs, vec![0.5, 25.5, 13.0]);

    let xs = QuadCoord::DEFAULT.coord(&s.graph, &s.layers, &spacing).unwrap();
    assert!(((xs[0] + xs[1]) / 2.0 - xs[2]).abs() < 1e-6, "{xs:?}");
    assert!((xs[1] - xs[0] - 25.0).abs() < 1e-6, "{xs:?}");
}

#[test]
fn simplex_centres_a_child_between_equal_pulls() {
    let s = sugi(&["a", "b", "c"], &[("a", "c"), ("b", "c")], &[0, 0, 1]);
    let w = widths(&s, 1.0);
    let spacing = Spacing {
        widths: &w,
        gap: 24.0,
    };
    let xs = SimplexCoord.coord(&s.graph, &s.layers, &spacing).unwrap();
    assert_eq!(xs[1] - xs[0], 25.0);
    assert!(xs[2] >= xs[0] && xs[2] <= xs[1]);
}

#[test]
fn topological_coordinates_stack_reals_and_lane_long_edges() {
    let s = sugi(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "c"), ("b", "d"), ("a", "d")],
        &[0, 1, 2, 3],
    );
    let w = widths(&s, 2.0);
    let spacing = Spacing {
        widths: &w,
        gap: 5.0,
    };
    let xs = TopologicalCoord.coord(&s.graph, &s.layers, &spacing).unwrap();
    for real in 0..4 {
        assert_eq!(xs[real], 0.0);
    }
    // a->d overlaps both others; b->d starts after a->c ends and reuses its lane.
    let lane_x = |chain: &Vec<usize>| xs[chain[0]];
    let ac = lane_x(&s.chains[3]);
    let bd = lane_x(&s.chains[4]);
    let ad = lane_x(&s.chains[5]);
    assert_eq!(ac, 6.0);
    assert_eq!(ad, 11.0);
    assert_eq!(bd, 6.0);
    for chain in &s.chains {
        for &d in chain {
            assert_eq!(xs[d], xs[chain[0]]);
        }
    }
}

#[test]
fn topological_coordinates_reject_wide_layers() {
    let s = fork();
    let w = widths(&s, 1.0);
    let spacing = Spacing {
        widths: &w,
        gap: 1.0,
    };
    let err = TopologicalCoord
        .coord(&s.graph, &s.layers, &spacing)
        .unwrap_err();
    assert_eq!(err, Error::NotTopological { layer: 0 });
}
