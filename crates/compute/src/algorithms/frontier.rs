//! Parallel Prim's algorithm over a single lock-protected frontier.
//!
//! Every pool worker runs the same loop: take the lock, pop the cheapest
//! frontier edge, grow the tree by one vertex, push the new vertex's
//! edges, release. Pop and grow happen inside one critical section, so a
//! vertex can never be claimed twice and no ownership bookkeeping is
//! needed: whichever worker pops an edge processes it. Parallelism is
//! bounded by contention on that one lock; the structure is the point,
//! not the speedup.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;

use spanner_core::{Edge, MstResult};
use spanner_graph::GraphStore;
use tracing::error;

use crate::error::ComputeError;
use crate::exec::TaskPool;
use crate::exec::pool::panic_message;

struct FrontierState {
    /// Candidate edges out of the tree, cheapest first. Entries going to
    /// an already-claimed vertex go stale and are discarded on pop.
    heap: BinaryHeap<Reverse<Edge>>,
    in_tree: Vec<bool>,
    /// Vertices not yet claimed; 0 stops every worker.
    remaining: usize,
    /// Lowest id that might still be unclaimed, for reseeding.
    cursor: usize,
    result: MstResult,
}

impl FrontierState {
    /// Claims `vertex` and pushes its edges to unclaimed neighbors.
    fn grow(&mut self, graph: &GraphStore, vertex: u32) {
        self.in_tree[vertex as usize] = true;
        self.remaining -= 1;
        for &nb in graph.neighbors(vertex) {
            if !self.in_tree[nb as usize] {
                self.heap
                    .push(Reverse(Edge::new(vertex, nb, graph.edge_weight(vertex, nb))));
            }
        }
    }
}

/// Runs Prim's algorithm with all pool workers sharing one frontier.
pub fn shared_frontier_mst(
    graph: &GraphStore,
    pool: &TaskPool,
) -> Result<MstResult, ComputeError> {
    let n = graph.num_vertices();
    if n == 0 {
        return Ok(MstResult::new(0));
    }

    let mut state = FrontierState {
        heap: BinaryHeap::new(),
        in_tree: vec![false; n],
        remaining: n,
        cursor: 0,
        result: MstResult::new(n),
    };
    // Seed the first component before any worker starts.
    state.grow(graph, 0);
    let shared = Mutex::new(state);

    let workers = pool.workers();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        pool.scope(|s| {
            for _ in 0..workers {
                s.spawn(|_| {
                    if let Err(e) = worker_loop(graph, &shared) {
                        error!("Frontier worker stopped: {e}");
                    }
                });
            }
        });
    }));
    if let Err(payload) = outcome {
        return Err(ComputeError::TaskPanicked(panic_message(payload.as_ref())));
    }

    let state = shared
        .into_inner()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    Ok(state.result)
}

fn worker_loop(graph: &GraphStore, shared: &Mutex<FrontierState>) -> Result<(), ComputeError> {
    loop {
        let mut state = shared
            .lock()
            .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
        if state.remaining == 0 {
            return Ok(());
        }
        match state.heap.pop() {
            Some(Reverse(edge)) => {
                if state.in_tree[edge.dest as usize] {
                    // Stale: the vertex was claimed through a cheaper edge.
                    continue;
                }
                state.result.push(edge.src, edge.dest, edge.weight);
                state.grow(graph, edge.dest);
            }
            None => {
                // Current component is complete; seed the next one under
                // the same lock so no other worker sees an empty frontier
                // with work left.
                while state.in_tree[state.cursor] {
                    state.cursor += 1;
                }
                let root = state.cursor as u32;
                state.grow(graph, root);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(workers: usize) -> TaskPool {
        TaskPool::new(workers).unwrap()
    }

    fn make_triangle() -> GraphStore {
        GraphStore::from_edges(&[
            Edge::new(0, 1, 1),
            Edge::new(1, 2, 2),
            Edge::new(0, 2, 3),
        ])
    }

    #[test]
    fn triangle_matches_known_mst() {
        let mst = shared_frontier_mst(&make_triangle(), &pool(4)).unwrap();
        assert_eq!(mst.total_weight, 3);
        assert_eq!(mst.num_edges(), 2);
        let mut pairs: Vec<(u32, u32)> = mst
            .edges
            .iter()
            .map(|e| Edge::new(e.parent, e.vertex, e.weight).endpoints_unordered())
            .collect();
        pairs.sort();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn single_worker_equals_serial() {
        let g = make_triangle();
        let mst = shared_frontier_mst(&g, &pool(1)).unwrap();
        assert_eq!(mst.total_weight, super::super::serial::serial_mst(&g).total_weight);
    }

    #[test]
    fn disconnected_graph_yields_a_forest() {
        let g = GraphStore::from_edges(&[
            Edge::new(0, 1, 1),
            Edge::new(1, 2, 2),
            Edge::new(0, 2, 3),
            Edge::new(3, 4, 4),
            Edge::new(4, 5, 5),
            Edge::new(3, 5, 6),
        ]);
        let mst = shared_frontier_mst(&g, &pool(4)).unwrap();
        assert_eq!(mst.num_edges(), 4);
        assert_eq!(mst.total_weight, 12);
    }

    #[test]
    fn empty_graph_is_fine() {
        let mst = shared_frontier_mst(&GraphStore::new(0), &pool(2)).unwrap();
        assert_eq!(mst.num_edges(), 0);
    }

    #[test]
    fn many_workers_on_a_tiny_graph() {
        // More workers than vertices: most of them just observe
        // remaining == 0 and leave.
        let g = GraphStore::from_edges(&[Edge::new(0, 1, 9)]);
        let mst = shared_frontier_mst(&g, &pool(8)).unwrap();
        assert_eq!(mst.total_weight, 9);
        assert_eq!(mst.num_edges(), 1);
    }

    #[test]
    fn repeated_runs_agree() {
        let g = GraphStore::from_edges(&[
            Edge::new(0, 1, 4),
            Edge::new(0, 2, 4),
            Edge::new(1, 2, 2),
            Edge::new(1, 3, 3),
            Edge::new(2, 3, 4),
            Edge::new(3, 4, 1),
        ]);
        let p = pool(4);
        let first = shared_frontier_mst(&g, &p).unwrap();
        for _ in 0..10 {
            let again = shared_frontier_mst(&g, &p).unwrap();
            assert_eq!(again.total_weight, first.total_weight);
            assert_eq!(again.num_edges(), first.num_edges());
        }
    }
}
