use std::path::{Path, PathBuf};

use uab_core::config::SyncSettings;
use uab_core::export::{render_sync_json, render_sync_log, save_last_sync, suggested_log_file_name};
use uab_core::{SyncResult, SyncService};

use crate::commands::common::{format_sync_report, write_output};
use crate::error::CliError;

pub async fn run_sync(
    settings: SyncSettings,
    as_json: bool,
    export_path: Option<&Path>,
    no_save: bool,
) -> Result<SyncResult, CliError> {
    let service = SyncService::connect(settings)?;
    let result = service.sync().await?;
    let asset_directory = &service.settings().asset_directory;

    // A missing root stays missing; the result is still printed.
    if !no_save && asset_directory.is_dir() {
        match save_last_sync(&result, asset_directory) {
            Ok(path) => tracing::debug!(path = %path.display(), "saved sync result"),
            Err(error) => tracing::warn!(%error, "failed to save sync result"),
        }
    }

    if let Some(path) = export_path {
        let target = export_target(path, &result);
        write_output(&target, &render_sync_log(&result))?;
        eprintln!("Exported sync log to {}", target.display());
    }

    if as_json {
        println!("{}", render_sync_json(&result)?);
    } else {
        for line in format_sync_report(&result) {
            println!("{line}");
        }
    }

    Ok(result)
}

/// A directory receives a generated file name; anything else is used as is.
pub fn export_target(path: &Path, result: &SyncResult) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_log_file_name(result.start_time))
    } else {
        path.to_path_buf()
    }
}
