//! Error types for the converter

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Conversion cancelled")]
    Cancelled,

    #[error("Invalid converter configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },
}
