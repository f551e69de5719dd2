//! Sequential Prim's algorithm, the reference the parallel variants are
//! checked against.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use spanner_core::{MstResult, NO_EDGE, VertexId, Weight};
use spanner_graph::GraphStore;

/// A priority queue entry: the cheapest known connection cost of a vertex.
///
/// Uses reversed ordering so `BinaryHeap` (a max-heap) behaves as a
/// min-heap; weight ties resolve to the lowest vertex id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    key: Weight,
    vertex: VertexId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Grows a minimum spanning tree from vertex 0, one cheapest vertex at a
/// time.
///
/// The heap is never purged: a vertex gets a fresh entry on every key
/// improvement, and entries for vertices already in the tree are simply
/// discarded when popped. On disconnected inputs the next component is
/// seeded at the lowest unvisited id, so the result is always the full
/// spanning forest.
pub fn serial_mst(graph: &GraphStore) -> MstResult {
    let n = graph.num_vertices();
    let mut result = MstResult::new(n);
    if n == 0 {
        return result;
    }

    let mut in_tree = vec![false; n];
    let mut key = vec![NO_EDGE; n];
    // A vertex is its own parent until a cheaper connection claims it;
    // self-parented vertices are component roots and yield no edge.
    let mut parent: Vec<VertexId> = (0..n as VertexId).collect();
    let mut heap = BinaryHeap::new();
    let mut remaining = n;
    let mut cursor = 0usize;

    while remaining > 0 {
        // Seed the next component at the lowest unvisited vertex.
        while in_tree[cursor] {
            cursor += 1;
        }
        let root = cursor as VertexId;
        key[cursor] = 0;
        heap.push(HeapEntry {
            key: 0,
            vertex: root,
        });

        while let Some(HeapEntry { key: k, vertex: u }) = heap.pop() {
            let ui = u as usize;
            if in_tree[ui] {
                // Stale entry left behind by a later key improvement.
                continue;
            }
            in_tree[ui] = true;
            remaining -= 1;
            if parent[ui] != u {
                result.push(parent[ui], u, k);
            }

            for &v in graph.neighbors(u) {
                let vi = v as usize;
                if !in_tree[vi] {
                    let w = graph.edge_weight(u, v);
                    if w < key[vi] {
                        key[vi] = w;
                        parent[vi] = u;
                        heap.push(HeapEntry { key: w, vertex: v });
                    }
                }
            }
        }
    }

    result
}
