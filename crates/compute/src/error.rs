use thiserror::Error;

/// Error type for parallel execution and the MST strategies.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Thread pool build failed: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    #[error("Worker panicked: {0}")]
    TaskPanicked(String),

    #[error("Worker result channel disconnected")]
    Disconnected,

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}
