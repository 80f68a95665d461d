//! Audit trail of a single reconciliation pass.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AssetRecord, NewAsset};

/// Severity of a sync log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncLogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl SyncLogLevel {
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for SyncLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped decision taken during a sync pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncLogEntry {
    /// Assigned when the entry is created
    pub timestamp: DateTime<Utc>,
    pub level: SyncLogLevel,
    pub message: String,
    /// Asset directory the entry is about, if any
    #[serde(default)]
    pub asset_path: Option<String>,
}

impl fmt::Display for SyncLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        write!(f, "[{time}] [{}]", self.level)?;
        if let Some(path) = &self.asset_path {
            write!(f, " [{path}]")?;
        }
        write!(f, " {}", self.message)
    }
}

/// Result of one reconciliation pass.
///
/// A result is in progress until [`SyncResult::complete`] sets the end
/// timestamp. Counters and asset lists are final from then on; only the
/// closing log line is appended afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub server_asset_count: usize,
    pub local_asset_count: usize,
    pub assets_posted: Vec<NewAsset>,
    pub assets_missing_locally: Vec<AssetRecord>,
    pub errors: Vec<String>,
    pub log_entries: Vec<SyncLogEntry>,
}

/// Flat snapshot of a result's counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub server_asset_count: usize,
    pub local_asset_count: usize,
    pub assets_posted: usize,
    pub assets_missing_locally: usize,
    pub error_count: usize,
    pub log_entry_count: usize,
}

impl SyncSummary {
    /// Key/value pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_time", self.start_time.to_rfc3339()),
            (
                "end_time",
                self.end_time
                    .map_or_else(|| "None".to_string(), |end| end.to_rfc3339()),
            ),
            (
                "duration_seconds",
                self.duration_seconds
                    .map_or_else(|| "None".to_string(), |seconds| format!("{seconds:.3}")),
            ),
            ("server_asset_count", self.server_asset_count.to_string()),
            ("local_asset_count", self.local_asset_count.to_string()),
            ("assets_posted", self.assets_posted.to_string()),
            (
                "assets_missing_locally",
                self.assets_missing_locally.to_string(),
            ),
            ("error_count", self.error_count.to_string()),
            ("log_entry_count", self.log_entry_count.to_string()),
        ]
    }
}

impl Default for SyncResult {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncResult {
    /// Start a new, in-progress result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            server_asset_count: 0,
            local_asset_count: 0,
            assets_posted: Vec::new(),
            assets_missing_locally: Vec::new(),
            errors: Vec::new(),
            log_entries: Vec::new(),
        }
    }

    /// Append a log entry and mirror it to `tracing`.
    pub fn add_log(
        &mut self,
        level: SyncLogLevel,
        message: impl Into<String>,
        asset_path: Option<&str>,
    ) {
        let message = message.into();
        let asset_path = asset_path.map(ToString::to_string);
        let path = asset_path.as_deref().unwrap_or_default();
        match level {
            SyncLogLevel::Info | SyncLogLevel::Success => {
                tracing::info!(severity = %level, asset_path = path, "{message}");
            }
            SyncLogLevel::Warning => tracing::warn!(asset_path = path, "{message}"),
            SyncLogLevel::Error => tracing::error!(asset_path = path, "{message}"),
        }

        // Wall clocks can step backwards; entries must not.
        let mut timestamp = Utc::now();
        if let Some(last) = self.log_entries.last() {
            timestamp = timestamp.max(last.timestamp);
        }
        self.log_entries.push(SyncLogEntry {
            timestamp,
            level,
            message,
            asset_path,
        });
    }

    /// Record a failure: an ERROR entry plus an entry in the error list.
    pub fn record_error(&mut self, message: impl Into<String>, asset_path: Option<&str>) {
        let message = message.into();
        self.add_log(SyncLogLevel::Error, message.clone(), asset_path);
        self.errors.push(message);
    }

    /// Set the end timestamp. Call exactly once, after the last step.
    pub fn complete(&mut self) {
        self.end_time = Some(Utc::now().max(self.start_time));
    }

    pub const fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }

    /// Elapsed time, available once complete.
    pub fn duration(&self) -> Option<chrono::TimeDelta> {
        self.end_time.map(|end| end - self.start_time)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration()
            .map(|duration| duration.num_microseconds().unwrap_or(i64::MAX) as f64 / 1_000_000.0)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn summary(&self) -> SyncSummary {
        SyncSummary {
            start_time: self.start_time,
            end_time: self.end_time,
            duration_seconds: self.duration_seconds(),
            server_asset_count: self.server_asset_count,
            local_asset_count: self.local_asset_count,
            assets_posted: self.assets_posted.len(),
            assets_missing_locally: self.assets_missing_locally.len(),
            error_count: self.errors.len(),
            log_entry_count: self.log_entries.len(),
        }
    }

    pub fn logs_by_level(&self, level: SyncLogLevel) -> Vec<&SyncLogEntry> {
        self.log_entries
            .iter()
            .filter(|entry| entry.level == level)
            .collect()
    }
}
