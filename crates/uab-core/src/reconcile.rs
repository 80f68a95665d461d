//! Reconciliation between the remote catalog and the local asset directory.
//!
//! One pass runs strictly in sequence on the calling task:
//!
//! 1. fetch remote assets (fail-soft),
//! 2. scan the local root,
//! 3. report remote assets with no local directory (WARNING, report only),
//! 4. create catalog entries for local directories the catalog lacks.
//!
//! Step 3 always precedes step 4, and each step walks its source in natural
//! order (server response order, then filesystem walk order). Failures are
//! recorded per asset; nothing short-circuits the pass.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tokio::sync::Mutex;

use crate::catalog::{self, AssetCatalog, HttpAssetCatalog};
use crate::config::{SyncSettings, DEFAULT_ROOT_MARKER};
use crate::models::{AssetRecord, LocalAssetCandidate, NewAsset};
use crate::paths::comparison_key;
use crate::scanner;
use crate::sync::{SyncLogLevel, SyncResult};
use crate::{Error, Result};

/// A single reconciliation pass over one catalog and one directory.
pub struct Reconciler<'a, C: ?Sized> {
    catalog: &'a C,
    asset_directory: &'a Path,
    root_marker: Option<&'a str>,
}

impl<'a, C> Reconciler<'a, C>
where
    C: AssetCatalog + ?Sized,
{
    pub const fn new(catalog: &'a C, asset_directory: &'a Path) -> Self {
        Self {
            catalog,
            asset_directory,
            root_marker: Some(DEFAULT_ROOT_MARKER),
        }
    }

    #[must_use]
    pub fn with_root_marker(mut self, root_marker: Option<&'a str>) -> Self {
        self.root_marker = root_marker;
        self
    }

    /// Run the pass. Never fails: problems end up in the returned result.
    pub async fn run(&self) -> SyncResult {
        let mut result = SyncResult::new();
        result.add_log(SyncLogLevel::Info, "Starting sync operation", None);

        // In-memory copies only; stored rows keep whatever form they have.
        let remote = catalog::fetch_all(self.catalog, &mut result)
            .await
            .iter()
            .map(AssetRecord::with_rooted_path)
            .collect::<Vec<_>>();
        result.server_asset_count = remote.len();

        let local = scanner::scan(self.asset_directory, &mut result);
        result.local_asset_count = local.len();

        self.report_missing_locally(&remote, &local, &mut result);
        self.post_missing_on_server(&remote, &local, &mut result).await;

        result.complete();
        let seconds = result.duration_seconds().unwrap_or_default();
        result.add_log(
            SyncLogLevel::Info,
            format!("Sync completed in {seconds:.2} seconds"),
            None,
        );
        result
    }

    fn key(&self, path: &str) -> String {
        comparison_key(path, self.root_marker)
    }

    fn report_missing_locally(
        &self,
        remote: &[AssetRecord],
        local: &[LocalAssetCandidate],
        result: &mut SyncResult,
    ) {
        let local_keys = local
            .iter()
            .map(|candidate| self.key(&candidate.path))
            .collect::<HashSet<_>>();

        for asset in remote {
            if local_keys.contains(&self.key(&asset.directory_path)) {
                continue;
            }
            result.add_log(
                SyncLogLevel::Warning,
                format!("Server asset not found locally: {}", asset.name),
                Some(&asset.directory_path),
            );
            result.assets_missing_locally.push(asset.clone());
        }
    }

    async fn post_missing_on_server(
        &self,
        remote: &[AssetRecord],
        local: &[LocalAssetCandidate],
        result: &mut SyncResult,
    ) {
        let mut known_keys = remote
            .iter()
            .map(|asset| self.key(&asset.directory_path))
            .collect::<HashSet<_>>();
        let remote_count = known_keys.len();
        // Keys posted during this pass, with the directory that claimed them.
        let mut posted_from: HashMap<String, String> = HashMap::new();

        for candidate in local {
            let key = self.key(&candidate.path);
            if let Some(first) = posted_from.get(&key) {
                result.add_log(
                    SyncLogLevel::Warning,
                    format!(
                        "Skipping duplicate local asset: {} (same catalog path as {first})",
                        candidate.name()
                    ),
                    Some(&candidate.path),
                );
                continue;
            }
            if known_keys.contains(&key) {
                continue;
            }

            let payload = NewAsset::from_candidate(candidate);
            result.add_log(
                SyncLogLevel::Info,
                format!("Posting new asset to server: {}", payload.name),
                Some(&payload.directory_path),
            );
            if catalog::create(self.catalog, &payload, result).await.is_some() {
                result.add_log(
                    SyncLogLevel::Success,
                    format!("Successfully posted asset: {}", payload.name),
                    Some(&payload.directory_path),
                );
                result.assets_posted.push(payload);
                // Two local directories can share a key below the marker.
                known_keys.insert(key.clone());
                posted_from.insert(key, candidate.path.clone());
            }
        }

        tracing::debug!(
            remote_keys = remote_count,
            posted = result.assets_posted.len(),
            "local pass finished"
        );
    }
}

/// Owns a catalog and settings and runs at most one pass at a time.
///
/// The service keeps no history; callers hold on to the results they want.
pub struct SyncService<C> {
    catalog: C,
    settings: SyncSettings,
    in_flight: Mutex<()>,
}

impl SyncService<HttpAssetCatalog> {
    /// Service backed by the HTTP catalog described in `settings`.
    pub fn connect(settings: SyncSettings) -> Result<Self> {
        let catalog = HttpAssetCatalog::from_settings(&settings)?;
        Ok(Self::new(catalog, settings))
    }
}

impl<C: AssetCatalog> SyncService<C> {
    pub fn new(catalog: C, settings: SyncSettings) -> Self {
        Self {
            catalog,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    pub const fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Run one pass, or fail with [`Error::SyncInProgress`] if another pass
    /// on this service has not finished yet.
    pub async fn sync(&self) -> Result<SyncResult> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| Error::SyncInProgress)?;

        let result = Reconciler::new(&self.catalog, &self.settings.asset_directory)
            .with_root_marker(self.settings.root_marker.as_deref())
            .run()
            .await;
        Ok(result)
    }
}
