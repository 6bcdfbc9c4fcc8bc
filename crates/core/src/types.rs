use thiserror::Error;

/// The main error type for specflow operations
#[derive(Debug, Error)]
pub enum SpecflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Spec error: {0}")]
    Spec(String),

    #[error("Task selection error: {0}")]
    Selection(String),

    #[error("Claude Code error: {0}")]
    Claude(String),

    #[error("Watch error: {0}")]
    Watch(String),
}

/// Result type alias for specflow operations
pub type SpecflowResult<T> = Result<T, SpecflowError>;
