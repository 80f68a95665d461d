use uab_core::browse::{assets_in_directory, filter_assets_by_text};
use uab_core::config::SyncSettings;

use crate::commands::common::{asset_to_list_item, format_asset_lines, list_assets, AssetListItem};
use crate::error::CliError;

pub async fn run_list(
    settings: &SyncSettings,
    directory: Option<&str>,
    search: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let assets = list_assets(settings).await?;
    let in_directory = assets_in_directory(
        &assets,
        directory.unwrap_or_default(),
        settings.root_marker.as_deref(),
    );
    let selected = filter_assets_by_text(in_directory, search.unwrap_or_default());

    if as_json {
        let json_items = selected
            .iter()
            .map(|asset| asset_to_list_item(asset))
            .collect::<Vec<AssetListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if selected.is_empty() {
        println!("No assets found.");
    } else {
        for line in format_asset_lines(&selected) {
            println!("{line}");
        }
    }

    Ok(())
}
