//! Persistent CLI configuration.
//!
//! Each setting resolves as: command-line flag, then environment variable,
//! then the config file, then the built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uab_core::config::{
    normalize_text_option, SyncSettings, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_ROOT_MARKER,
    DEFAULT_SERVER_URL,
};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_SERVER_URL: &str = "UAB_SERVER_URL";
pub const ENV_ASSET_DIR: &str = "UAB_ASSET_DIR";
pub const ENV_ROOT_MARKER: &str = "UAB_ROOT_MARKER";
pub const ENV_TIMEOUT_SECS: &str = "UAB_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UabConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub asset_directory: Option<PathBuf>,
    #[serde(default)]
    pub root_marker: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Values given on the command line for this invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub asset_directory: Option<PathBuf>,
    pub root_marker: Option<String>,
    pub no_root_marker: bool,
    pub timeout_secs: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("uab").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

impl UabConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        std::fs::write(path, serde_json::to_string_pretty(&normalized)?)?;
        Ok(())
    }

    /// Fold explicit command-line values into the stored config.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = normalize_text_option(overrides.server_url.clone()) {
            self.server_url = Some(url);
        }
        if let Some(directory) = &overrides.asset_directory {
            self.asset_directory = Some(directory.clone());
        }
        if let Some(marker) = normalize_text_option(overrides.root_marker.clone()) {
            self.root_marker = Some(marker);
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        self.normalize();
    }

    /// Resolve effective sync settings. `env` looks up environment variables.
    pub fn resolve<F>(&self, overrides: &ConfigOverrides, env: F) -> Result<SyncSettings, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = normalize_text_option(overrides.server_url.clone())
            .or_else(|| normalize_text_option(env(ENV_SERVER_URL)))
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let asset_directory = overrides
            .asset_directory
            .clone()
            .or_else(|| normalize_text_option(env(ENV_ASSET_DIR)).map(PathBuf::from))
            .or_else(|| self.asset_directory.clone())
            .ok_or(CliError::AssetDirectoryNotConfigured)?;

        let root_marker = if overrides.no_root_marker {
            None
        } else {
            Some(
                normalize_text_option(overrides.root_marker.clone())
                    .or_else(|| normalize_text_option(env(ENV_ROOT_MARKER)))
                    .or_else(|| self.root_marker.clone())
                    .unwrap_or_else(|| DEFAULT_ROOT_MARKER.to_string()),
            )
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(timeout) => timeout,
            None => match normalize_text_option(env(ENV_TIMEOUT_SECS)) {
                Some(raw) => raw.parse::<u64>().map_err(|error| {
                    CliError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number: {error}"))
                })?,
                None => self
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
        };

        Ok(SyncSettings::new(server_url, asset_directory)?
            .with_root_marker(root_marker)
            .with_request_timeout(Duration::from_secs(timeout_secs))?)
    }

    fn normalize(&mut self) {
        self.server_url = normalize_text_option(self.server_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        self.root_marker = normalize_text_option(self.root_marker.take());
        self.asset_directory = self
            .asset_directory
            .take()
            .filter(|directory| !directory.as_os_str().is_empty());
    }
}
