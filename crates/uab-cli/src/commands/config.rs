use std::path::Path;

use uab_core::config::SyncSettings;

use crate::cli::ConfigCommands;
use crate::config::{ConfigOverrides, UabConfig};
use crate::error::CliError;

pub fn run_config(
    command: &ConfigCommands,
    config_path: &Path,
    overrides: &ConfigOverrides,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init => run_config_init(config_path, overrides),
        ConfigCommands::Show => run_config_show(config_path, overrides),
    }
}

pub fn run_config_init(config_path: &Path, overrides: &ConfigOverrides) -> Result<(), CliError> {
    let mut config = UabConfig::load_from_path(config_path)?;
    config.apply_overrides(overrides);
    if overrides.no_root_marker {
        config.root_marker = None;
    }
    config.save_to_path(config_path)?;

    tracing::info!(path = %config_path.display(), "saved config");
    println!("{}", config_path.display());
    Ok(())
}

pub fn run_config_show(config_path: &Path, overrides: &ConfigOverrides) -> Result<(), CliError> {
    let config = UabConfig::load_from_path(config_path)?;
    let settings = config.resolve(overrides, |key| std::env::var(key).ok())?;
    for line in format_settings(config_path, &settings) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_settings(config_path: &Path, settings: &SyncSettings) -> Vec<String> {
    vec![
        format!("config:          {}", config_path.display()),
        format!("server_url:      {}", settings.server_url),
        format!("asset_directory: {}", settings.asset_directory.display()),
        format!(
            "root_marker:     {}",
            settings.root_marker.as_deref().unwrap_or("(none)")
        ),
        format!("timeout:         {}s", settings.request_timeout.as_secs()),
    ]
}
