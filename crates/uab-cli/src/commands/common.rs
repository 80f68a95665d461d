use std::path::{Path, PathBuf};

use serde::Serialize;
use uab_core::catalog::{AssetCatalog, HttpAssetCatalog};
use uab_core::config::SyncSettings;
use uab_core::{AssetKind, AssetRecord, SyncResult};

use crate::cli::Cli;
use crate::config::{default_config_path, UabConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct AssetListItem {
    pub id: i64,
    pub name: String,
    pub kind: AssetKind,
    pub directory_path: String,
    pub description: Option<String>,
    pub preview_image_file_path: Option<String>,
}

/// Settings for this invocation from flags, environment and the config file.
pub fn load_settings(cli: &Cli) -> Result<SyncSettings, CliError> {
    let config = UabConfig::load_from_path(&config_path(cli.config.as_deref())?)?;
    config.resolve(&cli.overrides(), |key| std::env::var(key).ok())
}

pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    explicit.map_or_else(default_config_path, |path| Ok(path.to_path_buf()))
}

pub async fn list_assets(settings: &SyncSettings) -> Result<Vec<AssetRecord>, CliError> {
    let catalog = HttpAssetCatalog::from_settings(settings)?;
    Ok(catalog.list_assets().await?)
}

pub fn asset_to_list_item(asset: &AssetRecord) -> AssetListItem {
    AssetListItem {
        id: asset.id,
        name: asset.name.clone(),
        kind: asset.kind(),
        directory_path: asset.directory_path.clone(),
        description: asset.description.clone(),
        preview_image_file_path: asset.preview_image_file_path.clone(),
    }
}

pub fn format_asset_lines(assets: &[&AssetRecord]) -> Vec<String> {
    assets
        .iter()
        .map(|asset| {
            let kind = match asset.kind() {
                AssetKind::Generic => "generic",
                AssetKind::Visual => "visual",
            };
            format!(
                "{:>6}  {:<24}  {kind:<7}  {}",
                asset.id, asset.name, asset.directory_path
            )
        })
        .collect()
}

/// Short human-readable summary of a finished pass.
pub fn format_sync_report(result: &SyncResult) -> Vec<String> {
    let mut lines = vec![
        format!("Server assets:   {}", result.server_asset_count),
        format!("Local assets:    {}", result.local_asset_count),
        format!("Posted:          {}", result.assets_posted.len()),
        format!("Missing locally: {}", result.assets_missing_locally.len()),
    ];
    if let Some(seconds) = result.duration_seconds() {
        lines.push(format!("Duration:        {seconds:.2}s"));
    }

    for asset in &result.assets_missing_locally {
        lines.push(format!("  missing: {} ({})", asset.name, asset.directory_path));
    }
    for asset in &result.assets_posted {
        lines.push(format!("  posted:  {} ({})", asset.name, asset.directory_path));
    }
    for error in &result.errors {
        lines.push(format!("  error:   {error}"));
    }

    let error_count = result.error_count();
    if error_count > 0 {
        lines.push(format!("Sync completed with {error_count} errors"));
    } else {
        lines.push(format!(
            "Sync completed successfully - {} assets posted",
            result.assets_posted.len()
        ));
    }
    lines
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
