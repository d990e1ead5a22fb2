use crate::sugi::SugiGraph;

/// Number of edge crossings of a layered ordering.
pub fn cross_count(g: &SugiGraph, layers: &[Vec<usize>]) -> usize {
    let mut pos: Vec<usize> = vec![0; g.node_count()];
    let mut cc = 0usize;
    for i in 1..layers.len() {
        cc += two_layer_cross_count_with(g, &layers[i - 1], &layers[i], &mut pos);
    }
    cc
}

/// Crossings between the edges from `north` into `south`.
pub fn two_layer_cross_count(g: &SugiGraph, north: &[usize], south: &[usize]) -> usize {
    let mut pos: Vec<usize> = vec![0; g.node_count()];
    two_layer_cross_count_with(g, north, south, &mut pos)
}

/// Accumulator-tree count (Barth, Jünger, Mutzel). `pos` is scratch space sized to the graph.
pub(crate) fn two_layer_cross_count_with(
    g: &SugiGraph,
    north: &[usize],
    south: &[usize],
    pos: &mut [usize],
) -> usize {
    if south.is_empty() || north.is_empty() {
        return 0;
    }
    for (i, &v) in south.iter().enumerate() {
        pos[v] = i;
    }
    let in_south = |v: usize| south.get(pos[v]) == Some(&v);

    let mut first_index = 1usize;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0usize;
    let mut targets: Vec<usize> = Vec::new();
    for &v in north {
        targets.clear();
        targets.extend(g.successors(v).filter(|&w| in_south(w)).map(|w| pos[w]));
        targets.sort_unstable();
        for &p in &targets {
            let mut index = p + first_index;
            tree[index] += 1;
            let mut weight_sum = 0usize;
            while index > 0 {
                if index % 2 == 1 {
                    weight_sum += tree[index + 1];
                }
                index = (index - 1) >> 1;
                tree[index] += 1;
            }
            cc += weight_sum;
        }
    }
    cc
}
