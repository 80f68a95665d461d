use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use uab_core::SyncLogLevel;

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "uab")]
#[command(about = "Keep a local asset directory and the asset catalog in step")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Asset catalog base URL
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,

    /// Local asset directory to scan
    #[arg(long, global = true, alias = "root", value_name = "PATH")]
    pub asset_dir: Option<PathBuf>,

    /// Directory name asset paths are compared relative to
    #[arg(long, global = true, value_name = "NAME")]
    pub root_marker: Option<String>,

    /// Compare whole paths instead of marker-relative ones
    #[arg(long, global = true, conflicts_with = "root_marker")]
    pub no_root_marker: bool,

    /// Catalog request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            server_url: self.server_url.clone(),
            asset_directory: self.asset_dir.clone(),
            root_marker: self.root_marker.clone(),
            no_root_marker: self.no_root_marker,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the asset directory with the catalog
    Sync {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Write the text log to a file, or into a directory under a generated name
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
        /// Do not keep the result for `uab log`
        #[arg(long)]
        no_save: bool,
    },
    /// Show the log of the last sync
    Log {
        /// Only show entries of this level
        #[arg(short, long, value_enum)]
        level: Option<LogLevelArg>,
        /// Write the log to a file instead of stdout
        #[arg(short = 'o', long, alias = "output", value_name = "PATH")]
        export: Option<PathBuf>,
        /// Output the stored result as JSON, keeping only `--level` entries if given
        #[arg(long)]
        json: bool,
    },
    /// List catalog assets
    #[command(alias = "ls")]
    List {
        /// Only assets in this directory (relative to the root marker) or below
        #[arg(short, long, value_name = "DIR")]
        dir: Option<String>,
        /// Only assets whose name or path contains this text (case-insensitive)
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog assets grouped by directory
    Tree {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one asset directory to the catalog
    Import {
        /// Asset directory
        path: PathBuf,
    },
    /// Delete a catalog asset
    Delete {
        /// Asset id
        id: i64,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the global flags given on this invocation to the config file
    Init,
    /// Print the effective settings
    Show,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevelArg {
    Info,
    Success,
    Warning,
    Error,
}

impl From<LogLevelArg> for SyncLogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Success => Self::Success,
            LogLevelArg::Warning => Self::Warning,
            LogLevelArg::Error => Self::Error,
        }
    }
}
