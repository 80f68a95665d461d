//! Error types for uab-core

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type alias using uab-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in uab-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Asset catalog request failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another sync pass is still running against the same catalog
    #[error("A sync operation is already in progress")]
    SyncInProgress,
}
