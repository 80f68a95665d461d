//! Path normalization shared by the scanner, reconciliation, and browsing.
//!
//! Catalog paths and filesystem paths come from different machines and eras,
//! so they are never compared verbatim. Both sides are reduced to segments
//! (either separator accepted, `.` dropped, `..` folded) and then cut down to
//! the part below the root marker directory.
//!
//! Marker policy: when a path contains the marker segment, everything up to
//! and including its first occurrence is dropped. When it does not, the whole
//! normalized path is kept. Paths are never discarded for lacking a marker.

use std::path::Path;

pub const SEPARATOR: char = '/';

/// Split a path into normalized segments.
pub fn segments(path: &str) -> Vec<&str> {
    let absolute = path.starts_with(['/', '\\']);
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(part),
            },
            _ => parts.push(part),
        }
    }
    parts
}

/// Prefix `path` with `/` unless it already starts with one.
pub fn ensure_leading_separator(path: &str) -> String {
    if path.starts_with(SEPARATOR) {
        path.to_string()
    } else {
        format!("{SEPARATOR}{path}")
    }
}

/// Last normalized segment, if any.
pub fn file_name(path: &str) -> Option<&str> {
    segments(path).pop().filter(|name| *name != "..")
}

/// Segments below the first `marker` segment, or `None` when the path has
/// no such segment.
pub fn marker_relative<'a>(path: &'a str, marker: &str) -> Option<Vec<&'a str>> {
    let parts = segments(path);
    let index = parts.iter().position(|part| *part == marker)?;
    Some(parts[index + 1..].to_vec())
}

/// Segments used to compare and group paths under the marker policy.
pub fn relative_segments<'a>(path: &'a str, marker: Option<&str>) -> Vec<&'a str> {
    marker
        .and_then(|marker| marker_relative(path, marker))
        .unwrap_or_else(|| segments(path))
}

/// Key under which a catalog path and a local path are considered equal.
pub fn comparison_key(path: &str, marker: Option<&str>) -> String {
    format!("{SEPARATOR}{}", relative_segments(path, marker).join("/"))
}

/// Render a filesystem path with `/` separators on every platform.
#[cfg(windows)]
pub fn path_to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
pub fn path_to_slash(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn segments_accept_mixed_separators() {
        assert_eq!(
            segments(r"C:\Users\dev/Assets\HDRIs"),
            vec!["C:", "Users", "dev", "Assets", "HDRIs"]
        );
    }

    #[test]
    fn segments_fold_dot_components() {
        assert_eq!(segments("/a/./b/../c//"), vec!["a", "c"]);
        assert_eq!(segments("/../a"), vec!["a"]);
        assert_eq!(segments("../a"), vec!["..", "a"]);
    }

    #[test]
    fn ensure_leading_separator_is_stable() {
        assert_eq!(ensure_leading_separator("Assets/x"), "/Assets/x");
        assert_eq!(ensure_leading_separator("/Assets/x"), "/Assets/x");
    }

    #[test]
    fn file_name_returns_last_segment() {
        assert_eq!(file_name("/Assets/HDRIs/noon/"), Some("noon"));
        assert_eq!(file_name("/"), None);
    }

    #[test]
    fn marker_relative_uses_first_marker() {
        assert_eq!(
            marker_relative("/Users/dev/Assets/HDRIs/Assets/x", "Assets"),
            Some(vec!["HDRIs", "Assets", "x"])
        );
        assert_eq!(marker_relative("/Users/dev/HDRIs", "Assets"), None);
    }

    #[test]
    fn comparison_key_matches_across_roots() {
        assert_eq!(
            comparison_key("Assets/HDRIs/dawn", Some("Assets")),
            comparison_key("/Users/dev/Assets/HDRIs/dawn", Some("Assets"))
        );
        assert_eq!(comparison_key("/Assets", Some("Assets")), "/");
    }

    #[test]
    fn comparison_key_without_marker_keeps_whole_path() {
        assert_eq!(comparison_key("srv/HDRIs/dawn", Some("Assets")), "/srv/HDRIs/dawn");
        assert_eq!(comparison_key("/srv/HDRIs/dawn/", None), "/srv/HDRIs/dawn");
    }
}
