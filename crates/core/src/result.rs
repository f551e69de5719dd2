//! Minimum spanning tree output shared by every strategy.

use serde::Serialize;

use crate::edge::{VertexId, Weight};

/// One tree edge. Prim-style growth orients it from the tree side;
/// merge-based strategies keep the endpoint order of the winning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MstEdge {
    pub parent: VertexId,
    pub vertex: VertexId,
    pub weight: Weight,
}

/// A minimum spanning tree, or spanning forest when the input graph is
/// disconnected.
///
/// For `N` vertices in `C` components the edge list holds exactly `N - C`
/// edges. The total is accumulated in `u64` so results from different
/// strategies compare exactly, without overflow on large graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstResult {
    pub edges: Vec<MstEdge>,
    pub total_weight: u64,
    pub num_vertices: usize,
}

impl MstResult {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0,
            num_vertices,
        }
    }

    /// Records a tree edge and adds its weight to the running total.
    pub fn push(&mut self, parent: VertexId, vertex: VertexId, weight: Weight) {
        self.edges.push(MstEdge {
            parent,
            vertex,
            weight,
        });
        self.total_weight += u64::from(weight);
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Sorts edges into the reporting order: ascending by joined vertex,
    /// then by parent. Strategies discover edges in different orders; after
    /// this call equal trees print identically.
    pub fn sort_for_output(&mut self) {
        self.edges.sort_by_key(|e| (e.vertex, e.parent));
    }
}
