//! Network simplex over a small constraint graph.
//!
//! Minimises `Σ weight · (rank[w] − rank[v])` subject to `rank[w] − rank[v] ≥ minlen` for every
//! edge `v → w` (Gansner et al., "A Technique for Drawing Directed Graphs"). Used both for
//! layering and, on an auxiliary graph, for x-coordinate assignment.
//!
//! The solver works on plain indices. Disconnected inputs are solved as a forest; each weakly
//! connected component is normalised so its minimum rank is 0.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexEdge {
    pub v: usize,
    pub w: usize,
    pub minlen: i64,
    pub weight: f64,
}

/// The constraint graph is cyclic; `node` is left over after topological peeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cyclic {
    pub node: usize,
}

/// Merges parallel edges (weights add, the largest `minlen` wins) and drops self-loops.
fn simplify(edges: &[SimplexEdge]) -> Vec<SimplexEdge> {
    let mut merged: rustc_hash::FxHashMap<(usize, usize), usize> = Default::default();
    let mut out: Vec<SimplexEdge> = Vec::with_capacity(edges.len());
    for e in edges {
        if e.v == e.w {
            continue;
        }
        match merged.get(&(e.v, e.w)) {
            Some(&ix) => {
                out[ix].weight += e.weight;
                out[ix].minlen = out[ix].minlen.max(e.minlen);
            }
            None => {
                merged.insert((e.v, e.w), out.len());
                out.push(*e);
            }
        }
    }
    out
}

/// Longest-path ranking: sources at 0, every node as early as its predecessors allow.
pub fn longest_path(n: usize, edges: &[SimplexEdge]) -> Result<Vec<i64>, Cyclic> {
    let mut out_adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut indegree: Vec<usize> = vec![0; n];
    for (ix, e) in edges.iter().enumerate() {
        out_adj[e.v].push(ix);
        indegree[e.w] += 1;
    }

    let mut rank: Vec<i64> = vec![0; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    let mut seen = 0usize;
    while let Some(v) = queue.pop_front() {
        seen += 1;
        for &ix in &out_adj[v] {
            let e = &edges[ix];
            rank[e.w] = rank[e.w].max(rank[v] + e.minlen);
            indegree[e.w] -= 1;
            if indegree[e.w] == 0 {
                queue.push_back(e.w);
            }
        }
    }

    if seen < n {
        let node = (0..n).find(|&v| indegree[v] > 0).unwrap_or(0);
        return Err(Cyclic { node });
    }
    Ok(rank)
}

struct Solver<'a> {
    edges: &'a [SimplexEdge],
    /// Incident edge indices per node (both directions).
    adj: Vec<Vec<usize>>,
    rank: Vec<i64>,
    tree_edge: Vec<bool>,
    /// Edge to the tree parent; `None` for roots.
    parent_edge: Vec<Option<usize>>,
    low: Vec<usize>,
    lim: Vec<usize>,
    cut: Vec<f64>,
    postorder: Vec<usize>,
    roots: Vec<usize>,
}

impl<'a> Solver<'a> {
    fn new(n: usize, edges: &'a [SimplexEdge], rank: Vec<i64>) -> Self {
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (ix, e) in edges.iter().enumerate() {
            adj[e.v].push(ix);
            adj[e.w].push(ix);
        }
        Self {
            edges,
            adj,
            rank,
            tree_edge: vec![false; edges.len()],
            parent_edge: vec![None; n],
            low: vec![0; n],
            lim: vec![0; n],
            cut: vec![0.0; edges.len()],
            postorder: Vec::with_capacity(n),
            roots: Vec::new(),
        }
    }

    fn slack(&self, ix: usize) -> i64 {
        let e = &self.edges[ix];
        self.rank[e.w] - self.rank[e.v] - e.minlen
    }

    fn other_end(&self, ix: usize, v: usize) -> usize {
        let e = &self.edges[ix];
        if e.v == v { e.w } else { e.v }
    }

    /// Grows a tight spanning tree per component, shifting tree ranks until every node is in.
    fn feasible_tree(&mut self) {
        let n = self.rank.len();
        let mut in_tree = vec![false; n];
        let mut tree_nodes: Vec<usize> = Vec::new();

        for start in 0..n {
            if in_tree[start] {
                continue;
            }
            in_tree[start] = true;
            self.roots.push(start);
            tree_nodes.clear();
            tree_nodes.push(start);

            loop {
                self.grow_tight(&mut in_tree, &mut tree_nodes);

                let mut best: Option<(i64, usize)> = None;
                for &v in &tree_nodes {
                    for &ix in &self.adj[v] {
                        let u = self.other_end(ix, v);
                        if in_tree[u] {
                            continue;
                        }
                        let slack = self.slack(ix);
                        if best.is_none_or(|(s, _)| slack < s) {
                            best = Some((slack, ix));
                        }
                    }
                }
                let Some((slack, ix)) = best else {
                    break;
                };
                let delta = if in_tree[self.edges[ix].v] { slack } else { -slack };
                for &v in &tree_nodes {
                    self.rank[v] += delta;
                }
            }
        }
    }

    fn grow_tight(&mut self, in_tree: &mut [bool], tree_nodes: &mut Vec<usize>) {
        let mut stack: Vec<usize> = tree_nodes.clone();
        while let Some(v) = stack.pop() {
            for i in 0..self.adj[v].len() {
                let ix = self.adj[v][i];
                let u = self.other_end(ix, v);
                if in_tree[u] || self.slack(ix) != 0 {
                    continue;
                }
                in_tree[u] = true;
                self.tree_edge[ix] = true;
                tree_nodes.push(u);
                stack.push(u);
            }
        }
    }

    /// Assigns `low`/`lim` postorder numbers and parent edges over the current tree.
    fn init_low_lim(&mut self) {
        let n = self.rank.len();
        let mut visited = vec![false; n];
        let mut next_lim = 1usize;
        self.postorder.clear();

        for r in 0..self.roots.len() {
            let root = self.roots[r];
            self.parent_edge[root] = None;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            visited[root] = true;
            self.low[root] = next_lim;

            while let Some(top) = stack.len().checked_sub(1) {
                let (v, mut cursor) = stack[top];
                let mut child: Option<(usize, usize)> = None;
                while cursor < self.adj[v].len() {
                    let ix = self.adj[v][cursor];
                    cursor += 1;
                    if !self.tree_edge[ix] {
                        continue;
                    }
                    let u = self.other_end(ix, v);
                    if !visited[u] {
                        child = Some((u, ix));
                        break;
                    }
                }
                stack[top].1 = cursor;

                if let Some((u, ix)) = child {
                    visited[u] = true;
                    self.parent_edge[u] = Some(ix);
                    self.low[u] = next_lim;
                    stack.push((u, 0));
                } else {
                    stack.pop();
                    self.lim[v] = next_lim;
                    next_lim += 1;
                    self.postorder.push(v);
                }
            }
        }
    }

    fn parent_of(&self, v: usize) -> Option<(usize, usize)> {
        self.parent_edge[v].map(|ix| (ix, self.other_end(ix, v)))
    }

    fn init_cut_values(&mut self) {
        for i in 0..self.postorder.len() {
            let child = self.postorder[i];
            let Some((pe, _parent)) = self.parent_of(child) else {
                continue;
            };
            self.cut[pe] = self.calc_cut_value(child, pe);
        }
    }

    fn calc_cut_value(&self, child: usize, pe: usize) -> f64 {
        let child_is_tail = self.edges[pe].v == child;
        let mut cut = self.edges[pe].weight;
        for &ix in &self.adj[child] {
            if ix == pe {
                continue;
            }
            let e = &self.edges[ix];
            let is_out = e.v == child;
            let points_to_head = is_out == child_is_tail;
            cut += if points_to_head { e.weight } else { -e.weight };
            if self.tree_edge[ix] {
                let other = self.cut[ix];
                cut += if points_to_head { -other } else { other };
            }
        }
        cut
    }

    fn leave_edge(&self) -> Option<usize> {
        (0..self.edges.len()).find(|&ix| self.tree_edge[ix] && self.cut[ix] < 0.0)
    }

    fn is_descendant(&self, v: usize, root: usize) -> bool {
        self.low[root] <= self.lim[v] && self.lim[v] <= self.lim[root]
    }

    fn enter_edge(&self, leaving: usize) -> Option<usize> {
        let e = &self.edges[leaving];
        let (tail, flip) = if self.lim[e.v] > self.lim[e.w] {
            (e.w, true)
        } else {
            (e.v, false)
        };

        let mut best: Option<(i64, usize)> = None;
        for ix in 0..self.edges.len() {
            if ix == leaving {
                continue;
            }
            let f = &self.edges[ix];
            if flip == self.is_descendant(f.v, tail) && flip != self.is_descendant(f.w, tail) {
                let slack = self.slack(ix);
                if best.is_none_or(|(s, _)| slack < s) {
                    best = Some((slack, ix));
                }
            }
        }
        best.map(|(_, ix)| ix)
    }

    fn update_ranks(&mut self) {
        // Reverse postorder visits every parent before its children.
        for i in (0..self.postorder.len()).rev() {
            let v = self.postorder[i];
            let Some((pe, parent)) = self.parent_of(v) else {
                continue;
            };
            let minlen = self.edges[pe].minlen;
            self.rank[v] = if self.edges[pe].v == v {
                self.rank[parent] - minlen
            } else {
                self.rank[parent] + minlen
            };
        }
    }

    fn run(&mut self, max_iterations: usize) {
        self.feasible_tree();
        self.init_low_lim();
        self.init_cut_values();

        let mut iterations = 0usize;
        while let Some(leaving) = self.leave_edge() {
            if iterations >= max_iterations {
                tracing::warn!(iterations, "network simplex stopped before optimality");
                break;
            }
            iterations += 1;
            let Some(entering) = self.enter_edge(leaving) else {
                break;
            };
            self.tree_edge[leaving] = false;
            self.tree_edge[entering] = true;
            self.init_low_lim();
            self.init_cut_values();
            self.update_ranks();
        }
        tracing::trace!(iterations, "network simplex finished");
    }

    /// Shifts every component so that its minimum rank is 0.
    fn normalize(&mut self) {
        let n = self.rank.len();
        let mut comp: Vec<usize> = vec![usize::MAX; n];
        let mut mins: Vec<i64> = Vec::new();
        for start in 0..n {
            if comp[start] != usize::MAX {
                continue;
            }
            let c = mins.len();
            let mut min = i64::MAX;
            let mut stack = vec![start];
            comp[start] = c;
            while let Some(v) = stack.pop() {
                min = min.min(self.rank[v]);
                for &ix in &self.adj[v] {
                    let u = self.other_end(ix, v);
                    if comp[u] == usize::MAX {
                        comp[u] = c;
                        stack.push(u);
                    }
                }
            }
            mins.push(min);
        }
        for v in 0..n {
            self.rank[v] -= mins[comp[v]];
        }
    }
}

/// Solves the constraint system. Fails only on cyclic input.
pub fn solve(n: usize, edges: &[SimplexEdge]) -> Result<Vec<i64>, Cyclic> {
    let edges = simplify(edges);
    let rank = longest_path(n, &edges)?;
    let mut solver = Solver::new(n, &edges, rank);
    let max_iterations = 64 + 8 * (n + edges.len());
    solver.run(max_iterations);
    solver.normalize();
    Ok(solver.rank)
}
