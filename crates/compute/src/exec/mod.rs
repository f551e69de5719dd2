//! Shared-memory execution primitives: a result-carrying worker pool and
//! a reusable round barrier.

pub mod barrier;
pub mod pool;

pub use barrier::Barrier;
pub use pool::{TaskHandle, TaskPool};
