#[derive(Debug, thiserror::Error)]
pub enum TokenBankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),
}

pub type Result<T> = std::result::Result<T, TokenBankError>;
