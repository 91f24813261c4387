//! Error types for the state store.

use crate::store::Category;
use thiserror::Error;

/// Store-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid state name: {0}")]
    InvalidState(String),

    #[error("Not found: {category}:{entity}:{key}")]
    NotFound {
        category: Category,
        entity: String,
        key: String,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl StoreError {
    /// True for the recoverable read-miss case; callers decide the fallback.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
