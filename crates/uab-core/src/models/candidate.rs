//! Local asset candidate model

use serde::{Deserialize, Serialize};

use crate::paths;

/// File whose presence turns a directory into an asset candidate.
pub const MARKER_FILE_NAME: &str = "meta.yaml";
/// Directory name that is never an asset candidate itself.
pub const RESERVED_DIR_NAME: &str = "meta";

/// A directory found on disk that looks like an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalAssetCandidate {
    /// Absolute directory path with `/` separators
    pub path: String,
}

impl LocalAssetCandidate {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Final path component, used as the default asset name.
    pub fn name(&self) -> &str {
        paths::file_name(&self.path).unwrap_or(&self.path)
    }
}
