use thiserror::Error;

/// Errors from the distributed merge pipeline.
///
/// Everything here is fatal to the computation: the coordinator kills the
/// remaining workers and reports, it never continues on a partial
/// exchange.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Bad frame magic: expected {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Slice size mismatch: expected {expected} edges, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Worker {index} failed: {reason}")]
    Worker { index: usize, reason: String },
}
