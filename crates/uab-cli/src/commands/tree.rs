use uab_core::browse::DirectoryTree;
use uab_core::config::SyncSettings;

use crate::commands::common::list_assets;
use crate::error::CliError;

pub async fn run_tree(settings: &SyncSettings, as_json: bool) -> Result<(), CliError> {
    let assets = list_assets(settings).await?;
    let tree = DirectoryTree::build(&assets, settings.root_marker.as_deref());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else if tree.asset_count() == 0 {
        println!("No assets found.");
    } else {
        print!("{}", tree.render());
    }
    Ok(())
}
