//! Validated settings for one sync pass.
//!
//! Front ends resolve user configuration (flags, environment, config files)
//! however they like and hand the result to [`SyncSettings`], which owns the
//! validation rules shared by every caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Catalog service started next to the desktop application.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
/// Directory name that anchors asset paths on every machine.
pub const DEFAULT_ROOT_MARKER: &str = "Assets";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings consumed by [`crate::SyncService`] and the HTTP catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Catalog base URL, scheme included, no trailing slash.
    pub server_url: String,
    /// Local root scanned for asset directories.
    pub asset_directory: PathBuf,
    /// Path segment every asset path is made relative to. `None` compares
    /// whole paths.
    pub root_marker: Option<String>,
    /// Per-request timeout for catalog calls.
    pub request_timeout: Duration,
}

impl SyncSettings {
    pub fn new(server_url: impl Into<String>, asset_directory: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            server_url: normalize_server_url(server_url.into())?,
            asset_directory: asset_directory.as_ref().to_path_buf(),
            root_marker: Some(DEFAULT_ROOT_MARKER.to_string()),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_root_marker(mut self, root_marker: Option<String>) -> Self {
        self.root_marker = normalize_text_option(root_marker);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::InvalidInput(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        self.request_timeout = timeout;
        Ok(self)
    }
}

/// Validate a catalog base URL and strip trailing slashes.
pub fn normalize_server_url(raw: String) -> Result<String> {
    let url = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::InvalidInput("server URL must not be empty".to_string()))?;
    if is_http_url(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "server URL must include http:// or https:// (got '{url}')"
        )))
    }
}

/// Trim optional text, mapping blank values to `None`.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
