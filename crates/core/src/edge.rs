//! Shared graph vocabulary: vertex ids, weights, and weighted edges.

use std::cmp::Ordering;

/// Dense vertex identifier in `[0, num_vertices)`.
pub type VertexId = u32;

/// Edge weight. Totally ordered; real weights are `< NO_EDGE`.
pub type Weight = u32;

/// Reserved sentinel meaning "no edge here". Compares greater than every
/// real weight, so min-scans over a weight row need no special casing.
pub const NO_EDGE: Weight = Weight::MAX;

/// A weighted undirected edge.
///
/// Edges compare by `(weight, src, dest)` ascending. That single order is
/// used everywhere an edge stream is sorted or tie-broken (worker-local
/// sorts, the k-way merge, candidate reduction), which is what makes the
/// distributed merge byte-equal to a single-process sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: VertexId,
    pub dest: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(src: VertexId, dest: VertexId, weight: Weight) -> Self {
        Self { src, dest, weight }
    }

    /// Endpoints with the lower id first. Two records describing the same
    /// undirected edge from either side map to the same key.
    pub fn endpoints_unordered(&self) -> (VertexId, VertexId) {
        if self.src <= self.dest {
            (self.src, self.dest)
        } else {
            (self.dest, self.src)
        }
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.src, self.dest).cmp(&(other.weight, other.src, other.dest))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
