use dagrank::{
    Point, RankGridOptions, RankPosition, SelectOptions, map_ranks_to_y_positions,
    map_ranks_to_y_positions_with, select_rank_lines,
};
use serde_json::{Value, json};

fn position(node: &Value) -> Option<Point> {
    Some(Point::new(
        node.get("x").and_then(Value::as_f64).unwrap_or(0.0),
        node.get("y")?.as_f64()?,
    ))
}

fn ys(ranks: &[RankPosition]) -> Vec<f64> {
    ranks.iter().map(|r| r.y_position).collect()
}

fn evenly_spaced(count: usize) -> Vec<RankPosition> {
    (0..count)
        .map(|i| RankPosition {
            rank: i as f64,
            y_position: i as f64 * 10.0,
            label: i.to_string(),
        })
        .collect()
}

#[test]
fn ranks_average_and_repair_into_order() {
    let nodes = vec![
        json!({ "rank": 2, "y": 30 }),
        json!({ "rank": 1, "y": 10 }),
        json!({ "rank": 2, "y": 40 }),
        json!({ "rank": 3, "y": 20 }),
    ];
    let out = map_ranks_to_y_positions(&nodes, position, &RankGridOptions::default());

    let ranks: Vec<f64> = out.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1.0, 2.0, 3.0]);
    // Rank 2 averages to 35; rank 3 (raw 20) is raised to the global maximum.
    assert_eq!(ys(&out), vec![10.0, 35.0, 40.0]);
    let labels: Vec<&str> = out.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);
}

#[test]
fn ordered_input_is_not_touched() {
    let nodes = vec![
        json!({ "rank": 0, "y": 5 }),
        json!({ "rank": 1, "y": 12 }),
        json!({ "rank": 1, "y": 14 }),
        json!({ "rank": 4, "y": 50 }),
    ];
    let out = map_ranks_to_y_positions(&nodes, position, &RankGridOptions::default());
    assert_eq!(ys(&out), vec![5.0, 13.0, 50.0]);
}

#[test]
fn first_label_wins_and_bad_nodes_are_skipped() {
    let nodes = vec![
        json!({ "rank": 1, "y": 10 }),
        json!({ "rank": 1, "y": 20, "label": "build" }),
        json!({ "rank": 1, "y": 30, "label": "ignored" }),
        json!({ "rank": "later", "y": 99 }),
        json!({ "rank": 2 }),
        json!({ "rank": 3, "y": 40, "x": "left" }),
    ];
    let out = map_ranks_to_y_positions(&nodes, position, &RankGridOptions::default());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].label, "build");
    assert_eq!(out[0].y_position, 20.0);
    assert_eq!(out[1].rank, 3.0);
}

#[test]
fn accessor_overrides_replace_the_conventional_fields() {
    let nodes = vec![
        json!({ "step": 7, "name": "seven", "y": 1 }),
        json!({ "step": 8, "name": "eight", "y": 2 }),
    ];
    let rank = |n: &Value| n.get("step").and_then(Value::as_f64);
    let label = |n: &Value| n.get("name").and_then(Value::as_str).map(str::to_string);
    let options = RankGridOptions {
        rank: Some(&rank),
        label: Some(&label),
    };
    let out = map_ranks_to_y_positions(&nodes, position, &options);
    assert_eq!(out[0].rank, 7.0);
    assert_eq!(out[1].label, "eight");
}

#[test]
fn closure_variant_works_on_plain_tuples() {
    let nodes = vec![(1.5, 3.0), (0.5, 1.0), (1.5, 5.0)];
    let out = map_ranks_to_y_positions_with(
        &nodes,
        |&(_, y)| Some(Point::new(0.0, y)),
        |&(r, _)| Some(r),
        |_| None,
    );
    assert_eq!(ys(&out), vec![1.0, 4.0]);
    assert_eq!(out[0].label, "0.5");
}

#[test]
fn aggregation_is_repeatable_and_monotone() {
    // Deliberately scrambled: ranks go up while raw y mostly goes down.
    let nodes: Vec<Value> = (0..30)
        .map(|i| json!({ "rank": i % 7, "y": ((i * 37) % 23) as f64 - (i % 7) as f64 * 3.0 }))
        .collect();
    let first = map_ranks_to_y_positions(&nodes, position, &RankGridOptions::default());
    let second = map_ranks_to_y_positions(&nodes, position, &RankGridOptions::default());
    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].rank < pair[1].rank);
        assert!(pair[0].y_position <= pair[1].y_position);
    }
}

#[test]
fn five_lines_out_of_ten() {
    let ranks = evenly_spaced(10);
    let out = select_rank_lines(
        &ranks,
        &SelectOptions {
            y_min: 0.0,
            y_max: 90.0,
            max_count: 5,
        },
    );
    assert_eq!(ys(&out), vec![0.0, 20.0, 40.0, 70.0, 90.0]);
}

#[test]
fn single_line_is_nearest_the_middle() {
    let ranks = evenly_spaced(10);
    let out = select_rank_lines(
        &ranks,
        &SelectOptions {
            y_min: 0.0,
            y_max: 90.0,
            max_count: 1,
        },
    );
    assert_eq!(ys(&out), vec![40.0]);
}

#[test]
fn selection_count_is_bounded() {
    let ranks = evenly_spaced(10);
    for max_count in 0..=12 {
        let out = select_rank_lines(
            &ranks,
            &SelectOptions {
                y_min: 0.0,
                y_max: 90.0,
                max_count,
            },
        );
        assert_eq!(out.len(), max_count.min(10), "max_count {max_count}");
        for pair in out.windows(2) {
            assert!(pair[0].y_position < pair[1].y_position);
        }
    }
}

#[test]
fn clustered_ranks_still_yield_distinct_lines() {
    let ranks: Vec<RankPosition> = [0.0, 1.0, 2.0, 3.0, 100.0]
        .iter()
        .enumerate()
        .map(|(i, &y)| RankPosition {
            rank: i as f64,
            y_position: y,
            label: i.to_string(),
        })
        .collect();
    let out = select_rank_lines(
        &ranks,
        &SelectOptions {
            y_min: 0.0,
            y_max: 100.0,
            max_count: 4,
        },
    );
    assert_eq!(out.len(), 4);
    assert_eq!(out.first().map(|r| r.y_position), Some(0.0));
    assert_eq!(out.last().map(|r| r.y_position), Some(100.0));
}

#[test]
fn bounds_filter_in_either_order() {
    let ranks = evenly_spaced(10);
    for (y_min, y_max) in [(15.0, 55.0), (55.0, 15.0)] {
        let out = select_rank_lines(
            &ranks,
            &SelectOptions {
                y_min,
                y_max,
                max_count: 10,
            },
        );
        assert_eq!(ys(&out), vec![20.0, 30.0, 40.0, 50.0]);
    }
}

#[test]
fn invalid_selection_parameters_select_nothing() {
    let ranks = evenly_spaced(10);
    for (y_min, y_max) in [(f64::NAN, 90.0), (0.0, f64::INFINITY)] {
        let out = select_rank_lines(
            &ranks,
            &SelectOptions {
                y_min,
                y_max,
                max_count: 3,
            },
        );
        assert!(out.is_empty());
    }
}

#[test]
fn few_lines_come_back_in_ascending_y() {
    let mut ranks = evenly_spaced(4);
    ranks.reverse();
    let out = select_rank_lines(
        &ranks,
        &SelectOptions {
            y_min: 0.0,
            y_max: 30.0,
            max_count: 10,
        },
    );
    assert_eq!(ys(&out), vec![0.0, 10.0, 20.0, 30.0]);
}

#[test]
fn epoch_millisecond_ranks_stay_distinct() {
    let t = 1.7e12;
    let nodes = vec![(t, 30.0), (t + 1000.0, 60.0), (t + 1.0, 40.0)];
    let out = map_ranks_to_y_positions_with(
        &nodes,
        |&(_, y)| Some(Point::new(0.0, y)),
        |&(r, _)| Some(r),
        |_| None,
    );
    let ranks: Vec<f64> = out.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![t, t + 1.0, t + 1000.0]);
    assert_eq!(ys(&out), vec![30.0, 40.0, 60.0]);
}
