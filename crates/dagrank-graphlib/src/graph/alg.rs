//! Graph algorithms shared by the layout stages.

use super::Graph;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// The graph is not acyclic. `node` lies on a directed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("graph contains a cycle through node index {node}")]
pub struct CycleError {
    pub node: usize,
}

/// Kahn's algorithm. Ready nodes are released in insertion order.
pub fn topsort<N, E>(g: &Graph<N, E>) -> Result<Vec<usize>, CycleError> {
    let mut indegree: Vec<usize> = (0..g.node_count()).map(|v| g.in_degree(v)).collect();
    let mut queue: VecDeque<usize> = g.sources().into();
    let mut out: Vec<usize> = Vec::with_capacity(g.node_count());

    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        }
    }

    finish_topsort(g, out, &indegree)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority(f64);

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Topological sort that releases the ready node with the lowest `priority` first (ties by
/// insertion index).
pub fn topsort_by_priority<N, E>(
    g: &Graph<N, E>,
    priority: impl Fn(usize) -> f64,
) -> Result<Vec<usize>, CycleError> {
    let mut indegree: Vec<usize> = (0..g.node_count()).map(|v| g.in_degree(v)).collect();
    let mut heap: BinaryHeap<Reverse<(Priority, usize)>> = g
        .sources()
        .into_iter()
        .map(|v| Reverse((Priority(priority(v)), v)))
        .collect();
    let mut out: Vec<usize> = Vec::with_capacity(g.node_count());

    while let Some(Reverse((_, v))) = heap.pop() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                heap.push(Reverse((Priority(priority(w)), w)));
            }
        }
    }

    finish_topsort(g, out, &indegree)
}

fn finish_topsort<N, E>(
    g: &Graph<N, E>,
    out: Vec<usize>,
    indegree: &[usize],
) -> Result<Vec<usize>, CycleError> {
    if out.len() == g.node_count() {
        return Ok(out);
    }

    // Every leftover node still has a leftover predecessor, so walking predecessors inside the
    // leftover set must revisit a node; that node sits on a cycle.
    let Some(start) = (0..g.node_count()).find(|&v| indegree[v] > 0) else {
        return Ok(out);
    };
    let mut seen = vec![false; g.node_count()];
    let mut v = start;
    loop {
        if seen[v] {
            return Err(CycleError { node: v });
        }
        seen[v] = true;
        let Some(u) = g.predecessors(v).find(|&u| indegree[u] > 0) else {
            return Err(CycleError { node: v });
        };
        v = u;
    }
}

/// Depth-first preorder over successors, starting from each root in turn.
pub fn preorder<N, E>(g: &Graph<N, E>, roots: &[usize]) -> Vec<usize> {
    let mut visited = vec![false; g.node_count()];
    let mut out: Vec<usize> = Vec::with_capacity(g.node_count());
    let mut stack: Vec<usize> = Vec::new();

    for &root in roots {
        if root >= visited.len() {
            continue;
        }
        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            out.push(v);
            let succ: Vec<usize> = g.successors(v).collect();
            for &w in succ.iter().rev() {
                if !visited[w] {
                    stack.push(w);
                }
            }
        }
    }
    out
}

/// Weakly connected components, each listed in discovery order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<usize>> {
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<usize>> = Vec::new();

    for start in 0..g.node_count() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for n in g.successors(v).chain(g.predecessors(v)) {
                if !seen[n] {
                    seen[n] = true;
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}
