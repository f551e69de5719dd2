//! Borůvka's algorithm: every component hunts its cheapest outgoing edge
//! in parallel rounds.
//!
//! Workers own contiguous vertex ranges and post candidate edges into
//! per-component slots, each guarded by its own small mutex rather than
//! one big lock. A reusable barrier splits every round in two: after the
//! first wait the round leader merges the posted candidates through a
//! disjoint-set forest and rebuilds the component labels, after the
//! second wait everyone re-reads the labels and either scans again or
//! stops. The component count at least halves each round, so there are
//! O(log N) rounds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, RwLock};

use spanner_core::{DisjointSet, Edge, MstResult, VertexId, chunk_range};
use spanner_graph::GraphStore;

use crate::error::ComputeError;
use crate::exec::{Barrier, TaskPool};

struct MergeState {
    dsu: DisjointSet,
    result: MstResult,
}

/// Runs Borůvka's algorithm on the pool. Disconnected inputs end with one
/// tree per component, exactly like the Prim variants.
pub fn boruvka_mst(graph: &GraphStore, pool: &TaskPool) -> Result<MstResult, ComputeError> {
    let n = graph.num_vertices();
    if n == 0 {
        return Ok(MstResult::new(0));
    }

    let workers = pool.workers();
    // Component label per vertex, rebuilt by the round leader.
    let comp: RwLock<Vec<VertexId>> = RwLock::new((0..n as VertexId).collect());
    // Cheapest outgoing candidate per component, indexed by root id.
    let slots: Vec<Mutex<Option<Edge>>> = (0..n).map(|_| Mutex::new(None)).collect();
    let barrier = Barrier::new(workers);
    let ctrl = Mutex::new(MergeState {
        dsu: DisjointSet::new(n),
        result: MstResult::new(n),
    });
    let done = AtomicBool::new(false);
    let first_error: OnceLock<ComputeError> = OnceLock::new();

    pool.scope(|s| {
        for w in 0..workers {
            let comp = &comp;
            let slots = &slots;
            let barrier = &barrier;
            let ctrl = &ctrl;
            let done = &done;
            let first_error = &first_error;
            s.spawn(move |_| {
                let range = chunk_range(n, workers, w);
                loop {
                    if let Err(e) = scan_phase(graph, comp, slots, range.clone()) {
                        let _ = first_error.set(e);
                    }

                    let leader = barrier.wait();
                    if leader {
                        if first_error.get().is_some() {
                            done.store(true, Ordering::SeqCst);
                        } else if let Err(e) = merge_phase(ctrl, comp, slots, &done) {
                            let _ = first_error.set(e);
                            done.store(true, Ordering::SeqCst);
                        }
                    }
                    barrier.wait();

                    if done.load(Ordering::SeqCst) {
                        return;
                    }
                }
            });
        }
    });

    if let Some(e) = first_error.into_inner() {
        return Err(e);
    }
    let state = ctrl
        .into_inner()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    Ok(state.result)
}

/// Posts the cheapest crossing edge seen from each owned vertex into its
/// component's slot.
fn scan_phase(
    graph: &GraphStore,
    comp: &RwLock<Vec<VertexId>>,
    slots: &[Mutex<Option<Edge>>],
    range: std::ops::Range<usize>,
) -> Result<(), ComputeError> {
    let labels = comp
        .read()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    for u in range {
        let cu = labels[u];
        for &v in graph.neighbors(u as VertexId) {
            if labels[v as usize] != cu {
                let edge = Edge::new(u as VertexId, v, graph.edge_weight(u as VertexId, v));
                post_candidate(&slots[cu as usize], edge)?;
            }
        }
    }
    Ok(())
}

/// Check-then-set under the slot's own lock; the slot keeps the minimum
/// in the canonical edge order.
fn post_candidate(slot: &Mutex<Option<Edge>>, edge: Edge) -> Result<(), ComputeError> {
    let mut current = slot
        .lock()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    if current.map_or(true, |best| edge < best) {
        *current = Some(edge);
    }
    Ok(())
}

/// Leader-only: drains every slot, merges through the disjoint-set forest
/// and rebuilds the labels. Sets `done` when one component remains or no
/// candidate merged anything.
fn merge_phase(
    ctrl: &Mutex<MergeState>,
    comp: &RwLock<Vec<VertexId>>,
    slots: &[Mutex<Option<Edge>>],
    done: &AtomicBool,
) -> Result<(), ComputeError> {
    let mut state = ctrl
        .lock()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    let mut progressed = false;
    for slot in slots {
        let candidate = slot
            .lock()
            .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?
            .take();
        if let Some(edge) = candidate {
            // Both sides of a merged pair may nominate the same edge; the
            // second union fails and drops the duplicate.
            if state.dsu.union(edge.src as usize, edge.dest as usize) {
                state.result.push(edge.src, edge.dest, edge.weight);
                progressed = true;
            }
        }
    }

    let mut labels = comp
        .write()
        .map_err(|e| ComputeError::LockPoisoned(e.to_string()))?;
    for (v, label) in labels.iter_mut().enumerate() {
        *label = state.dsu.find(v) as VertexId;
    }

    if state.dsu.components() == 1 || !progressed {
        done.store(true, Ordering::SeqCst);
    }
    Ok(())
}
