//! Local asset scanner.
//!
//! Walks the asset root and reports every directory that directly contains a
//! `meta.yaml` marker. A directory literally named `meta` is never reported,
//! but only its own name is checked: directories below a `meta` directory are
//! still candidates.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::models::{LocalAssetCandidate, MARKER_FILE_NAME, RESERVED_DIR_NAME};
use crate::paths::path_to_slash;
use crate::sync::{SyncLogLevel, SyncResult};

/// Scan `root` for asset candidates, in walk order (siblings sorted by name).
///
/// Each directory is visited once, so the returned list has no duplicates.
/// A missing root yields an empty list and one ERROR entry.
pub fn scan(root: &Path, result: &mut SyncResult) -> Vec<LocalAssetCandidate> {
    let root = absolute_root(root);
    let root_display = path_to_slash(&root);

    if !root.exists() {
        result.record_error(
            format!("Asset directory does not exist: {root_display}"),
            None,
        );
        return Vec::new();
    }

    result.add_log(
        SyncLogLevel::Info,
        format!("Scanning local filesystem: {root_display}"),
        None,
    );

    let mut candidates = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                let path = error.path().map(path_to_slash);
                result.add_log(
                    SyncLogLevel::Warning,
                    format!("Skipping unreadable path: {error}"),
                    path.as_deref(),
                );
                continue;
            }
        };

        // `Path::is_dir` follows symlinks, so a linked asset directory counts.
        // The walk itself does not descend into links.
        if is_candidate(entry.path()) {
            candidates.push(LocalAssetCandidate::new(path_to_slash(entry.path())));
        }
    }

    result.add_log(
        SyncLogLevel::Success,
        format!("Found {} local assets", candidates.len()),
        None,
    );
    candidates
}

fn is_candidate(path: &Path) -> bool {
    path.is_dir()
        && path.file_name().is_some_and(|name| name != RESERVED_DIR_NAME)
        && path.join(MARKER_FILE_NAME).is_file()
}

fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}
