//! Directory-oriented views over catalog assets.
//!
//! Uses the same root-marker policy as reconciliation, so an asset appears
//! under the same directory here as it is matched against on disk.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::models::AssetRecord;
use crate::paths::{relative_segments, segments};

/// Assets located in `selected` (marker-relative) or anywhere below it.
///
/// An empty selection matches every asset with a directory path.
pub fn assets_in_directory<'a>(
    assets: &'a [AssetRecord],
    selected: &str,
    marker: Option<&str>,
) -> Vec<&'a AssetRecord> {
    let selected = segments(selected);
    assets
        .iter()
        .filter(|asset| !asset.directory_path.trim().is_empty())
        .filter(|asset| {
            relative_segments(&asset.directory_path, marker).starts_with(&selected)
        })
        .collect()
}

/// Assets whose name or directory path contains `text`, ignoring case.
///
/// Blank text matches every asset.
pub fn filter_assets_by_text<'a, I>(assets: I, text: &str) -> Vec<&'a AssetRecord>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let needle = text.trim().to_lowercase();
    assets
        .into_iter()
        .filter(|asset| {
            needle.is_empty()
                || asset.name.to_lowercase().contains(&needle)
                || asset.directory_path.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Nested directory names with the assets that live in each directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryTree {
    pub children: BTreeMap<String, DirectoryTree>,
    pub assets: Vec<AssetRecord>,
}

impl DirectoryTree {
    /// Group assets by their marker-relative directory.
    pub fn build(assets: &[AssetRecord], marker: Option<&str>) -> Self {
        let mut tree = Self::default();
        for asset in assets {
            if asset.directory_path.trim().is_empty() {
                continue;
            }
            let mut node = &mut tree;
            for part in relative_segments(&asset.directory_path, marker) {
                node = node.children.entry(part.to_string()).or_default();
            }
            node.assets.push(asset.clone());
        }
        tree
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
            + self
                .children
                .values()
                .map(Self::asset_count)
                .sum::<usize>()
    }

    /// Indented listing: directories end with `/`, assets show their id.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_into(&mut output, 0);
        output
    }

    fn render_into(&self, output: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        for asset in &self.assets {
            let _ = writeln!(output, "{indent}* {} (#{})", asset.name, asset.id);
        }
        for (name, child) in &self.children {
            let _ = writeln!(output, "{indent}{name}/");
            child.render_into(output, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn asset(id: i64, name: &str, path: &str) -> AssetRecord {
        AssetRecord {
            id,
            name: name.to_string(),
            description: None,
            directory_path: path.to_string(),
            preview_image_file_path: None,
        }
    }

    fn library() -> Vec<AssetRecord> {
        vec![
            asset(1, "dawn_farm", "/Users/dev/Assets/Local/HDRIs/Outdoors/dawn_farm"),
            asset(2, "noon", "Assets/Local/HDRIs/noon"),
            asset(3, "brick", "/Assets/Local/Textures/brick"),
            asset(4, "loose", "/srv/misc/loose"),
            asset(5, "blank", "  "),
        ]
    }

    #[test]
    fn filter_includes_nested_directories() {
        let assets = library();
        let names = assets_in_directory(&assets, "Local/HDRIs", Some("Assets"))
            .into_iter()
            .map(|asset| asset.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["dawn_farm", "noon"]);
    }

    #[test]
    fn filter_does_not_match_partial_segment_names() {
        let assets = library();
        assert!(assets_in_directory(&assets, "Local/HDR", Some("Assets")).is_empty());
    }

    #[test]
    fn paths_without_marker_are_kept_whole() {
        let assets = library();
        let found = assets_in_directory(&assets, "/srv/misc", Some("Assets"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "loose");
    }

    #[test]
    fn text_filter_matches_name_ignoring_case() {
        let assets = library();
        let found = filter_assets_by_text(&assets, "  BRICK ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
    }

    #[test]
    fn text_filter_matches_directory_path() {
        let assets = library();
        let ids = filter_assets_by_text(&assets, "hdris/")
            .into_iter()
            .map(|asset| asset.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn blank_text_keeps_every_asset() {
        let assets = library();
        assert_eq!(filter_assets_by_text(&assets, "").len(), assets.len());
        assert_eq!(filter_assets_by_text(&assets, " \t").len(), assets.len());
    }

    #[test]
    fn text_filter_narrows_directory_selection() {
        let assets = library();
        let in_hdris = assets_in_directory(&assets, "Local/HDRIs", Some("Assets"));
        let found = filter_assets_by_text(in_hdris, "noon");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "noon");
    }

    #[test]
    fn tree_groups_assets_by_directory() {
        let tree = DirectoryTree::build(&library(), Some("Assets"));

        assert_eq!(tree.asset_count(), 4);
        let hdris = &tree.children["Local"].children["HDRIs"];
        assert_eq!(hdris.children["noon"].assets[0].id, 2);
        assert_eq!(
            hdris.children["Outdoors"].children["dawn_farm"].assets[0].id,
            1
        );
        assert!(tree.children.contains_key("srv"));
    }

    #[test]
    fn render_indents_levels() {
        let assets = vec![asset(3, "brick", "/Assets/Textures/brick")];
        let rendered = DirectoryTree::build(&assets, Some("Assets")).render();
        assert_eq!(rendered, "Textures/\n  brick/\n    * brick (#3)\n");
    }
}
