//! Selection Filter
//!
//! Decides which paths of the selected set matter to a folder visit. Only
//! explicitly listed paths are documented; descendants of a selected folder
//! are still traversed so their documentation can feed the parent's
//! aggregate. Descendant checks are component-wise, so `/a/bc` is never
//! mistaken for a child of `/a/b`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Immutable set of absolute paths chosen by the caller for documentation.
#[derive(Debug, Clone, Default)]
pub struct SelectedPaths {
    items: BTreeSet<PathBuf>,
}

impl SelectedPaths {
    pub fn new<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.items.contains(path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when `path` is itself selected, or any selected path is a strict
    /// descendant of it. Used to prune traversal: a folder failing this
    /// check is skipped entirely.
    pub fn is_selected_or_has_selected_children(&self, path: &Path) -> bool {
        if self.items.contains(path) {
            return true;
        }
        self.items
            .iter()
            .any(|selected| selected != path && selected.starts_with(path))
    }

    /// Selected entries whose immediate parent is `folder`, partitioned by
    /// filesystem type. Deeper descendants are picked up by deeper recursive
    /// calls, not here.
    pub fn direct_children(&self, folder: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut files = Vec::new();
        let mut subfolders = Vec::new();

        for item in &self.items {
            if item.parent() != Some(folder) {
                continue;
            }
            match std::fs::metadata(item) {
                Ok(meta) if meta.is_file() => files.push(item.clone()),
                Ok(meta) if meta.is_dir() => subfolders.push(item.clone()),
                Ok(_) => {}
                Err(err) => {
                    debug!(path = %item.display(), error = %err, "selected path not accessible");
                }
            }
        }

        (files, subfolders)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_itself() {
        let selected = SelectedPaths::new(["/a/b"]);
        assert!(selected.is_selected_or_has_selected_children(Path::new("/a/b")));
    }

    #[test]
    fn test_strict_descendant_counts() {
        let selected = SelectedPaths::new(["/a/b/c/d"]);
        assert!(selected.is_selected_or_has_selected_children(Path::new("/a/b")));
    }

    #[test]
    fn test_no_false_positive_on_name_prefix() {
        let selected = SelectedPaths::new(["/a/bc/d"]);
        assert!(!selected.is_selected_or_has_selected_children(Path::new("/a/b")));
    }

    #[test]
    fn test_unrelated_path_is_skipped() {
        let selected = SelectedPaths::new(["/x/y"]);
        assert!(!selected.is_selected_or_has_selected_children(Path::new("/a")));
    }

    #[test]
    fn test_direct_children_partition() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let file = root.join("main.rs");
        std::fs::write(&file, "fn main() {}\n").unwrap();
        let sub = root.join("sub");
        std::fs::create_dir(&sub).unwrap();
        let nested = sub.join("deep.rs");
        std::fs::write(&nested, "// deep\n").unwrap();

        let selected = SelectedPaths::new([file.clone(), sub.clone(), nested.clone()]);
        let (files, subfolders) = selected.direct_children(root);

        assert_eq!(files, vec![file]);
        assert_eq!(subfolders, vec![sub.clone()]);

        // The nested file belongs to the subfolder's visit, not the root's.
        let (sub_files, sub_dirs) = selected.direct_children(&sub);
        assert_eq!(sub_files, vec![nested]);
        assert!(sub_dirs.is_empty());
    }

    #[test]
    fn test_missing_selected_path_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("ghost.rs");
        let selected = SelectedPaths::new([ghost]);
        let (files, subfolders) = selected.direct_children(dir.path());
        assert!(files.is_empty());
        assert!(subfolders.is_empty());
    }
}
