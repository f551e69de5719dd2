pub mod config;
pub mod error;
pub mod pipeline;
pub mod protocol;
pub mod record;
pub mod worker;

pub use config::ClusterConfig;
pub use error::WireError;
pub use pipeline::{MergePipeline, Phase};
pub use record::RECORD_SIZE;
pub use worker::run_worker;
