use uab_core::catalog::{AssetCatalog, HttpAssetCatalog};
use uab_core::config::SyncSettings;

use crate::error::CliError;

pub async fn run_delete(settings: &SyncSettings, id: i64) -> Result<(), CliError> {
    let catalog = HttpAssetCatalog::from_settings(settings)?;
    let deleted = catalog.delete_asset(id).await?;
    println!("{} {}", deleted.id, deleted.name);
    Ok(())
}
