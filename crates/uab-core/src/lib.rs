//! uab-core - Core library for UAB
//!
//! This crate contains the asset models, the catalog client, the local asset
//! scanner, and the reconciliation engine that keeps a local asset directory
//! and the remote asset catalog in step.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod paths;
pub mod reconcile;
pub mod scanner;
pub mod sync;

pub use error::{Error, Result};
pub use models::{AssetKind, AssetRecord, LocalAssetCandidate, NewAsset};
pub use reconcile::{Reconciler, SyncService};
pub use sync::{SyncLogEntry, SyncLogLevel, SyncResult, SyncSummary};
