// crates/millops-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MillopsError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, MillopsError>;
