use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uab_core::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] uab_core::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No asset directory configured. Pass --asset-dir, set UAB_ASSET_DIR, or run `uab config init --asset-dir <PATH>`."
    )]
    AssetDirectoryNotConfigured,
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("No sync logs available. Run `uab sync` first.")]
    NoSyncLog,
}
