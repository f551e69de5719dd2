//! Dense adjacency-matrix graph store.
//!
//! Built once from an edge list, then read-only while the spanning tree
//! strategies run. Out-of-range vertex ids never panic: mutations are
//! dropped and reads return the [`NO_EDGE`] sentinel or an empty slice,
//! with a warning logged either way.

use spanner_core::{Edge, NO_EDGE, VertexId, Weight, chunk_range};
use tracing::warn;

/// Undirected weighted graph over the dense vertex range `[0, N)`.
pub struct GraphStore {
    num_vertices: usize,
    /// Row-major `N x N` symmetric weight matrix; diagonal is 0,
    /// absent edges hold [`NO_EDGE`].
    matrix: Vec<Weight>,
    /// Per-vertex neighbor lists, in insertion order. Re-inserting an edge
    /// appends again; scans tolerate the duplicates.
    adjacency: Vec<Vec<VertexId>>,
    num_edges: usize,
}

impl GraphStore {
    /// Empty graph over `[0, num_vertices)` with no edges.
    pub fn new(num_vertices: usize) -> Self {
        let mut matrix = vec![NO_EDGE; num_vertices * num_vertices];
        for v in 0..num_vertices {
            matrix[v * num_vertices + v] = 0;
        }
        Self {
            num_vertices,
            matrix,
            adjacency: vec![Vec::new(); num_vertices],
            num_edges: 0,
        }
    }

    /// Builds a store sized to fit every edge: one pass to find the highest
    /// vertex id, a second to insert. An empty list yields an empty graph.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let num_vertices = edges
            .iter()
            .map(|e| e.src.max(e.dest) as usize + 1)
            .max()
            .unwrap_or(0);
        let mut store = Self::new(num_vertices);
        for e in edges {
            store.add_edge(e.src, e.dest, e.weight);
        }
        store
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Count of successful `add_edge` calls, duplicates included.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    fn idx(&self, u: VertexId, v: VertexId) -> usize {
        u as usize * self.num_vertices + v as usize
    }

    #[inline]
    fn in_range(&self, v: VertexId) -> bool {
        (v as usize) < self.num_vertices
    }

    /// Inserts the undirected edge `src -- dest`, updating both matrix
    /// halves and both adjacency lists. Out-of-range ids drop the edge.
    pub fn add_edge(&mut self, src: VertexId, dest: VertexId, weight: Weight) {
        if !self.in_range(src) || !self.in_range(dest) {
            warn!(
                src,
                dest,
                num_vertices = self.num_vertices,
                "Ignoring edge with out-of-range vertex"
            );
            return;
        }
        let forward = self.idx(src, dest);
        let backward = self.idx(dest, src);
        self.matrix[forward] = weight;
        self.matrix[backward] = weight;
        self.adjacency[src as usize].push(dest);
        self.adjacency[dest as usize].push(src);
        self.num_edges += 1;
    }

    /// Neighbors of `v` in insertion order, empty for out-of-range ids.
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        if !self.in_range(v) {
            warn!(
                vertex = v,
                num_vertices = self.num_vertices,
                "Neighbor query for out-of-range vertex"
            );
            return &[];
        }
        &self.adjacency[v as usize]
    }

    /// Weight of `u -- v`, [`NO_EDGE`] when absent or out of range,
    /// 0 on the diagonal.
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Weight {
        if !self.in_range(u) || !self.in_range(v) {
            warn!(
                u,
                v,
                num_vertices = self.num_vertices,
                "Weight query for out-of-range vertex"
            );
            return NO_EDGE;
        }
        self.matrix[self.idx(u, v)]
    }

    /// Splits the vertex range into `parts` contiguous sub-stores.
    ///
    /// The first `num_vertices % parts` chunks are one vertex larger, so
    /// chunk sizes differ by at most one. Only edges with both endpoints in
    /// the same chunk survive, and vertex ids are re-based to each chunk's
    /// origin.
    pub fn partition(&self, parts: usize) -> Vec<GraphStore> {
        if parts == 0 {
            warn!("Partition into zero parts requested, returning nothing");
            return Vec::new();
        }
        let mut chunks = Vec::with_capacity(parts);
        for i in 0..parts {
            let range = chunk_range(self.num_vertices, parts, i);
            let start = range.start;
            let len = range.len();
            let mut sub = GraphStore::new(len);
            for u in 0..len {
                for v in (u + 1)..len {
                    let w = self.matrix[(start + u) * self.num_vertices + (start + v)];
                    if w != NO_EDGE {
                        sub.add_edge(u as VertexId, v as VertexId, w);
                    }
                }
            }
            chunks.push(sub);
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle() -> GraphStore {
        let mut g = GraphStore::new(3);
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, 2);
        g.add_edge(0, 2, 3);
        g
    }

    #[test]
    fn new_store_has_zero_diagonal_and_no_edges() {
        let g = GraphStore::new(3);
        for v in 0..3 {
            assert_eq!(g.edge_weight(v, v), 0);
        }
        assert_eq!(g.edge_weight(0, 1), NO_EDGE);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn add_edge_is_symmetric() {
        let g = make_triangle();
        assert_eq!(g.edge_weight(0, 1), 1);
        assert_eq!(g.edge_weight(1, 0), 1);
        assert_eq!(g.neighbors(1), &[0, 2]);
    }

    #[test]
    fn out_of_range_add_is_dropped() {
        let mut g = GraphStore::new(2);
        g.add_edge(0, 7, 5);
        g.add_edge(7, 0, 5);
        assert_eq!(g.num_edges(), 0);
        assert!(g.neighbors(0).is_empty());
    }

    #[test]
    fn out_of_range_reads_return_sentinels() {
        let g = make_triangle();
        assert_eq!(g.edge_weight(0, 9), NO_EDGE);
        assert!(g.neighbors(9).is_empty());
    }

    #[test]
    fn duplicate_insert_keeps_both_adjacency_entries() {
        let mut g = GraphStore::new(2);
        g.add_edge(0, 1, 4);
        g.add_edge(1, 0, 6);
        assert_eq!(g.edge_weight(0, 1), 6);
        assert_eq!(g.neighbors(0), &[1, 1]);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn from_edges_sizes_to_highest_id() {
        let g = GraphStore::from_edges(&[Edge::new(0, 1, 1), Edge::new(1, 5, 2)]);
        assert_eq!(g.num_vertices(), 6);
        assert_eq!(g.edge_weight(1, 5), 2);
    }

    #[test]
    fn from_edges_empty_yields_empty_graph() {
        let g = GraphStore::from_edges(&[]);
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn partition_spreads_remainder_over_first_chunks() {
        let g = GraphStore::new(10);
        let parts = g.partition(3);
        let sizes: Vec<usize> = parts.iter().map(|p| p.num_vertices()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn partition_keeps_only_intra_chunk_edges() {
        let mut g = GraphStore::new(4);
        g.add_edge(0, 1, 1);
        g.add_edge(2, 3, 2);
        g.add_edge(1, 2, 9);
        let parts = g.partition(2);
        assert_eq!(parts[0].edge_weight(0, 1), 1);
        assert_eq!(parts[1].edge_weight(0, 1), 2);
        assert_eq!(parts[0].num_edges(), 1);
        assert_eq!(parts[1].num_edges(), 1);
    }

    #[test]
    fn partition_into_more_parts_than_vertices() {
        let g = GraphStore::new(2);
        let parts = g.partition(4);
        let sizes: Vec<usize> = parts.iter().map(|p| p.num_vertices()).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0]);
    }

    #[test]
    fn partition_zero_parts_is_empty() {
        assert!(GraphStore::new(3).partition(0).is_empty());
    }
}
