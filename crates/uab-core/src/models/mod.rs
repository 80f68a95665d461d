//! Data models for UAB

mod asset;
mod candidate;

pub use asset::{AssetKind, AssetRecord, NewAsset};
pub use candidate::{LocalAssetCandidate, MARKER_FILE_NAME, RESERVED_DIR_NAME};
