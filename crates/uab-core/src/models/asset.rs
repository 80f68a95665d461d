//! Asset catalog models

use serde::{Deserialize, Serialize};

use crate::models::LocalAssetCandidate;
use crate::paths;
use crate::{Error, Result};

/// An asset record as stored by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Server-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Asset location; only meaningful relative to the root marker
    pub directory_path: String,
    /// Optional preview image for visual assets
    #[serde(default)]
    pub preview_image_file_path: Option<String>,
}

/// Asset flavour derived from the fields a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Generic,
    Visual,
}

impl AssetRecord {
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        if self.preview_image_file_path.is_some() {
            AssetKind::Visual
        } else {
            AssetKind::Generic
        }
    }

    /// Copy of this record whose directory path carries a leading separator.
    ///
    /// Older catalog rows were stored without one.
    #[must_use]
    pub fn with_rooted_path(&self) -> Self {
        Self {
            directory_path: paths::ensure_leading_separator(&self.directory_path),
            ..self.clone()
        }
    }
}

/// Payload for creating a catalog asset (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub directory_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_file_path: Option<String>,
}

impl NewAsset {
    /// Minimal payload for a directory: named after its final component.
    #[must_use]
    pub fn from_directory(directory_path: impl Into<String>) -> Self {
        Self::from_candidate(&LocalAssetCandidate::new(directory_path))
    }

    #[must_use]
    pub fn from_candidate(candidate: &LocalAssetCandidate) -> Self {
        Self {
            name: candidate.name().to_string(),
            description: None,
            directory_path: candidate.path.clone(),
            preview_image_file_path: None,
        }
    }

    /// Reject payloads the catalog would refuse.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("asset name cannot be empty".to_string()));
        }
        if self.directory_path.trim().is_empty() {
            return Err(Error::InvalidInput(
                "asset directory path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_catalog_row_without_optional_fields() {
        let record: AssetRecord =
            serde_json::from_str(r#"{"id":1,"name":"dawn","directory_path":"Assets/HDRIs/dawn"}"#)
                .unwrap();
        assert_eq!(record.description, None);
        assert_eq!(record.kind(), AssetKind::Generic);
    }

    #[test]
    fn preview_path_makes_asset_visual() {
        let record = AssetRecord {
            id: 7,
            name: "brick".to_string(),
            description: None,
            directory_path: "/Assets/Textures/brick".to_string(),
            preview_image_file_path: Some("/Assets/Textures/brick/preview.png".to_string()),
        };
        assert_eq!(record.kind(), AssetKind::Visual);
    }

    #[test]
    fn with_rooted_path_leaves_original_untouched() {
        let record = AssetRecord {
            id: 1,
            name: "dawn".to_string(),
            description: None,
            directory_path: "Assets/HDRIs/dawn".to_string(),
            preview_image_file_path: None,
        };
        let rooted = record.with_rooted_path();
        assert_eq!(rooted.directory_path, "/Assets/HDRIs/dawn");
        assert_eq!(record.directory_path, "Assets/HDRIs/dawn");
    }

    #[test]
    fn from_directory_serializes_minimal_payload() {
        let payload = NewAsset::from_directory("/Assets/HDRIs/noon");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"name": "noon", "directory_path": "/Assets/HDRIs/noon"})
        );
    }

    #[test]
    fn candidate_payload_uses_directory_name() {
        let candidate = LocalAssetCandidate::new("/Users/dev/Assets/Textures/brick");
        let payload = NewAsset::from_candidate(&candidate);
        assert_eq!(payload.name, "brick");
        assert_eq!(payload.directory_path, candidate.path);
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut payload = NewAsset::from_directory("/Assets/HDRIs/noon");
        assert!(payload.validate().is_ok());
        payload.name = "  ".to_string();
        assert!(payload.validate().is_err());
    }
}
