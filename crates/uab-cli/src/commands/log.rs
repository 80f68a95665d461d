use std::path::Path;

use uab_core::export::{load_last_sync, render_filtered_log, render_sync_json, render_sync_log};
use uab_core::{SyncLogLevel, SyncResult};

use crate::commands::common::write_output;
use crate::error::CliError;

pub fn run_log(
    asset_directory: &Path,
    level: Option<SyncLogLevel>,
    export_path: Option<&Path>,
    as_json: bool,
) -> Result<(), CliError> {
    let result = load_last_sync(asset_directory)?.ok_or(CliError::NoSyncLog)?;
    let rendered = if as_json {
        render_sync_json(&filter_entries(result, level))?
    } else {
        render_log(&result, level)
    };

    if let Some(path) = export_path {
        write_output(path, &rendered)?;
        println!("{}", path.display());
    } else {
        print!("{rendered}");
    }
    Ok(())
}

/// Text dump of `result`, optionally only the entries at `level`.
pub fn render_log(result: &SyncResult, level: Option<SyncLogLevel>) -> String {
    match level {
        Some(level) => render_filtered_log(result, result.logs_by_level(level)),
        None => render_sync_log(result),
    }
}

/// `result` with only the entries at `level`; every other field is kept.
pub fn filter_entries(mut result: SyncResult, level: Option<SyncLogLevel>) -> SyncResult {
    if let Some(level) = level {
        result.log_entries.retain(|entry| entry.level == level);
    }
    result
}
