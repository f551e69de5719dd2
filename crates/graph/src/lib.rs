pub mod io;
pub mod store;

pub use io::EdgeList;
pub use store::GraphStore;
