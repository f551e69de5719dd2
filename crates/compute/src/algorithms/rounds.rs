//! Round-based Prim's algorithm in map-reduce form.
//!
//! Instead of a shared frontier, each round scatters a minimum scan over
//! per-worker vertex ranges, reduces the candidates to one global winner,
//! and has the coordinator apply it. Workers only ever read the shared
//! arrays; the coordinator is the only writer, and it writes strictly
//! between rounds, so no round observes a half-applied update.

use std::sync::{Arc, RwLock};

use spanner_core::{Edge, MstResult, NO_EDGE, VertexId, Weight, chunk_range};
use spanner_graph::GraphStore;

use crate::error::ComputeError;
use crate::exec::{TaskHandle, TaskPool};

struct RoundState {
    in_tree: Vec<bool>,
    /// Cheapest known cost to connect each vertex to the growing tree.
    key: Vec<Weight>,
    /// Tree side of that cheapest connection; self means "none yet".
    parent: Vec<VertexId>,
}

impl RoundState {
    fn new(n: usize) -> Self {
        Self {
            in_tree: vec![false; n],
            key: vec![NO_EDGE; n],
            parent: (0..n as VertexId).collect(),
        }
    }

    /// Moves `vertex` into the tree and relaxes its neighbors.
    fn absorb(&mut self, graph: &GraphStore, vertex: VertexId) {
        self.in_tree[vertex as usize] = true;
        for &nb in graph.neighbors(vertex) {
            let ni = nb as usize;
            if !self.in_tree[ni] {
                let w = graph.edge_weight(vertex, nb);
                if w < self.key[ni] {
                    self.key[ni] = w;
                    self.parent[ni] = vertex;
                }
            }
        }
    }
}

/// Runs Prim's algorithm as `N - 1` scatter/reduce rounds on the pool.
pub fn reduction_rounds_mst(
    graph: &GraphStore,
    pool: &TaskPool,
) -> Result<MstResult, ComputeError> {
    let n = graph.num_vertices();
    let mut result = MstResult::new(n);
    if n == 0 {
        return Ok(result);
    }

    let workers = pool.workers();
    let state = Arc::new(RwLock::new(RoundState::new(n)));

    // Seed the first component.
    write_state(&state)?.absorb(graph, 0);
    let mut remaining = n - 1;

    while remaining > 0 {
        // Scatter: every worker scans only its own vertex range.
        let handles: Vec<TaskHandle<Result<Option<Edge>, ComputeError>>> = (0..workers)
            .map(|w| {
                let state = Arc::clone(&state);
                let range = chunk_range(n, workers, w);
                pool.submit(move || scan_range(&state, range))
            })
            .collect();

        // Reduce: the cheapest candidate wins; ties fall back to the
        // canonical (weight, parent, vertex) edge order.
        let mut best: Option<Edge> = None;
        for handle in handles {
            if let Some(candidate) = handle.wait()?? {
                if best.map_or(true, |b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }

        let mut st = write_state(&state)?;
        match best {
            Some(edge) => {
                result.push(edge.src, edge.dest, edge.weight);
                st.absorb(graph, edge.dest);
            }
            None => {
                // Nothing reachable: start the next component at the
                // lowest unvisited vertex, adding no edge this round.
                if let Some(root) = st.in_tree.iter().position(|t| !t) {
                    st.absorb(graph, root as VertexId);
                }
            }
        }
        remaining -= 1;
    }

    Ok(result)
}

/// Minimum-key unvisited vertex in `range`, as a candidate edge.
///
/// Strict comparison while scanning ascending ids keeps the lowest vertex
/// on equal keys.
fn scan_range(
    state: &RwLock<RoundState>,
    range: std::ops::Range<usize>,
) -> Result<Option<Edge>, ComputeError> {
    let st = state
        .read()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    let mut best: Option<Edge> = None;
    for v in range {
        if !st.in_tree[v] && st.key[v] < best.map_or(NO_EDGE, |b| b.weight) {
            best = Some(Edge::new(st.parent[v], v as VertexId, st.key[v]));
        }
    }
    Ok(best)
}

fn write_state(
    state: &RwLock<RoundState>,
) -> Result<std::sync::RwLockWriteGuard<'_, RoundState>, ComputeError> {
    state
        .write()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))
}
