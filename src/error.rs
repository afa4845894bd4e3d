#[derive(Debug, thiserror::Error)]
pub enum ComparioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Malformed persisted state: {0}")]
    MalformedState(String),

    #[error("CSV schema error: {0}")]
    CsvSchema(String),
}

pub type Result<T> = std::result::Result<T, ComparioError>;
