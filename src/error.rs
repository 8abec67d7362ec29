// src/error.rs

use thiserror::Error;

/// Everything that can go wrong while loading sales history or computing a reorder point.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// Bad policy constants, an empty series, or a malformed sales history.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ReorderError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
