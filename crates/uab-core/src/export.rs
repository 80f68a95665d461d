//! Sync log export helpers shared by every front end.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::models::RESERVED_DIR_NAME;
use crate::sync::{SyncLogEntry, SyncResult};
use crate::Result;

/// File holding the most recent result inside the asset root's `meta` directory.
pub const LAST_SYNC_FILE_NAME: &str = "last_sync.json";

const BANNER_WIDTH: usize = 80;

/// Human-readable dump: banner, summary block, then one line per entry.
#[must_use]
pub fn render_sync_log(result: &SyncResult) -> String {
    render_with_entries(result, result.log_entries.iter())
}

/// Same layout as [`render_sync_log`] restricted to the given entries.
#[must_use]
pub fn render_filtered_log<'a>(
    result: &SyncResult,
    entries: impl IntoIterator<Item = &'a SyncLogEntry>,
) -> String {
    render_with_entries(result, entries)
}

fn render_with_entries<'a>(
    result: &SyncResult,
    entries: impl IntoIterator<Item = &'a SyncLogEntry>,
) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut output = String::new();

    let _ = writeln!(output, "{banner}");
    let _ = writeln!(output, "SYNC LOG");
    let _ = writeln!(output, "{banner}");
    let _ = writeln!(output);
    let _ = writeln!(output, "SUMMARY:");
    for (key, value) in result.summary().fields() {
        let _ = writeln!(output, "  {key}: {value}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "{banner}");
    let _ = writeln!(output);
    let _ = writeln!(output, "LOG ENTRIES:");
    let _ = writeln!(output);
    for entry in entries {
        let _ = writeln!(output, "{entry}");
    }

    output
}

/// Pretty JSON of the whole result, reloadable with [`parse_sync_result`].
pub fn render_sync_json(result: &SyncResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn parse_sync_result(payload: &str) -> serde_json::Result<SyncResult> {
    serde_json::from_str(payload)
}

/// Deterministic file name for a text export of a pass started at `started_at`.
#[must_use]
pub fn suggested_log_file_name(started_at: DateTime<Utc>) -> String {
    format!("sync-{}.log", started_at.format("%Y%m%d-%H%M%S"))
}

/// Where the last result for `asset_directory` is kept.
#[must_use]
pub fn last_sync_path(asset_directory: &Path) -> PathBuf {
    asset_directory
        .join(RESERVED_DIR_NAME)
        .join(LAST_SYNC_FILE_NAME)
}

/// Persist `result` as the last result for `asset_directory`.
pub fn save_last_sync(result: &SyncResult, asset_directory: &Path) -> Result<PathBuf> {
    let path = last_sync_path(asset_directory);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render_sync_json(result)?)?;
    Ok(path)
}

/// Load the last result for `asset_directory`, if one was saved.
pub fn load_last_sync(asset_directory: &Path) -> Result<Option<SyncResult>> {
    let path = last_sync_path(asset_directory);
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(Some(parse_sync_result(&raw)?))
}
