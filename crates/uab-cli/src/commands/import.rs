use std::path::Path;

use uab_core::catalog::{AssetCatalog, HttpAssetCatalog};
use uab_core::config::SyncSettings;
use uab_core::paths::path_to_slash;
use uab_core::{AssetRecord, NewAsset};

use crate::error::CliError;

pub async fn run_import(settings: &SyncSettings, path: &Path) -> Result<AssetRecord, CliError> {
    let payload = import_payload(path)?;
    let catalog = HttpAssetCatalog::from_settings(settings)?;
    let created = catalog.create_asset(&payload).await?;
    tracing::info!(id = created.id, path = %created.directory_path, "imported asset");
    println!("{} {}", created.id, created.name);
    Ok(created)
}

/// Creation payload for one asset directory, named after the directory.
pub fn import_payload(path: &Path) -> Result<NewAsset, CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory(path.to_path_buf()));
    }
    let absolute = std::path::absolute(path)?;
    let payload = NewAsset::from_directory(path_to_slash(&absolute));
    payload.validate()?;
    Ok(payload)
}
