//! Asset catalog client.
//!
//! [`AssetCatalog`] is the seam between the sync engine and the remote CRUD
//! service. Implementations return typed errors; the engine goes through
//! [`fetch_all`] and [`create`], which turn every failure into a logged,
//! recorded entry on the [`SyncResult`] so a pass keeps going.

mod http;

use thiserror::Error;

use crate::models::{AssetRecord, NewAsset};
use crate::sync::{SyncLogLevel, SyncResult};

pub use http::HttpAssetCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Catalog HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Catalog API error: {message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("Asset not found: {0}")]
    NotFound(i64),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Remote asset catalog operations
#[allow(async_fn_in_trait)]
pub trait AssetCatalog {
    /// Human-readable location used in log messages
    fn location(&self) -> String;

    /// Fetch every asset, in server order
    async fn list_assets(&self) -> CatalogResult<Vec<AssetRecord>>;

    /// Create an asset; the catalog assigns its id
    async fn create_asset(&self, asset: &NewAsset) -> CatalogResult<AssetRecord>;

    /// Delete an asset by id, returning the deleted record
    async fn delete_asset(&self, id: i64) -> CatalogResult<AssetRecord>;
}

/// Fetch all remote assets, degrading to an empty list on failure.
pub async fn fetch_all<C>(catalog: &C, result: &mut SyncResult) -> Vec<AssetRecord>
where
    C: AssetCatalog + ?Sized,
{
    result.add_log(
        SyncLogLevel::Info,
        format!("Fetching assets from server: {}", catalog.location()),
        None,
    );

    match catalog.list_assets().await {
        Ok(assets) => {
            result.add_log(
                SyncLogLevel::Success,
                format!("Retrieved {} assets from server", assets.len()),
                None,
            );
            assets
        }
        Err(error) => {
            result.record_error(format!("Failed to get assets from server: {error}"), None);
            Vec::new()
        }
    }
}

/// Create one asset. Failures are logged against the asset and yield `None`.
pub async fn create<C>(
    catalog: &C,
    asset: &NewAsset,
    result: &mut SyncResult,
) -> Option<AssetRecord>
where
    C: AssetCatalog + ?Sized,
{
    match catalog.create_asset(asset).await {
        Ok(created) => Some(created),
        Err(error) => {
            result.record_error(
                format!(
                    "Failed to post asset '{}' at {}: {error}",
                    asset.name, asset.directory_path
                ),
                Some(&asset.directory_path),
            );
            None
        }
    }
}
