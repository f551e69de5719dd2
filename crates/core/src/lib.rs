pub mod chunk;
pub mod dsu;
pub mod edge;
pub mod error;
pub mod result;

pub use chunk::{chunk_range, chunk_sizes};
pub use dsu::DisjointSet;
pub use edge::*;
pub use error::*;
pub use result::*;
