//! Minimum spanning tree strategies.
//!
//! [`serial`] is the reference implementation; every parallel variant
//! must report the same total weight for the same input. The variants
//! differ in how they share state: one locked frontier, read-locked
//! scatter/reduce rounds, or per-component slots between barriers.

pub mod boruvka;
pub mod frontier;
pub mod rounds;
pub mod serial;

pub use boruvka::boruvka_mst;
pub use frontier::shared_frontier_mst;
pub use rounds::reduction_rounds_mst;
pub use serial::serial_mst;
