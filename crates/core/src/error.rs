use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid graph input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}
