use thiserror::Error;

pub type Result<T> = std::result::Result<T, TedaError>;

#[derive(Debug, Error)]
pub enum TedaError {
    #[error("Failed to read board from storage: {0}")]
    StorageRead(String),

    #[error("Failed to write board to storage: {0}")]
    StorageWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid priority '{0}'. Valid priorities: low, medium, high")]
    InvalidPriority(String),

    #[error("Invalid priority filter '{0}'. Valid filters: all, low, medium, high")]
    InvalidPriorityFilter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
