pub mod algorithms;
pub mod engine;
pub mod error;
pub mod exec;

pub use algorithms::{boruvka_mst, reduction_rounds_mst, serial_mst, shared_frontier_mst};
pub use engine::{Strategy, compute_mst};
pub use error::ComputeError;
pub use exec::{Barrier, TaskHandle, TaskPool};
