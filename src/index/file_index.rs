//! Stem → path index over the Markdown files of a root directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::infra::{FileSystem, FsError, is_markdown, stem_of};

/// Maps file stems to every path carrying that stem.
///
/// Several notes may share a stem in different directories; candidates keep
/// discovery order. The index is invalid until the first [`rebuild`], and
/// again after [`invalidate`], but keeps its last contents until rebuilt.
///
/// [`rebuild`]: FileIndex::rebuild
/// [`invalidate`]: FileIndex::invalidate
#[derive(Debug, Default)]
pub struct FileIndex {
    by_stem: HashMap<String, Vec<PathBuf>>,
    by_lower_stem: HashMap<String, Vec<PathBuf>>,
    paths: Vec<PathBuf>,
    valid: bool,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the index and rescans `root` for up to `limit` Markdown files.
    ///
    /// Returns the number of files indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be walked; the index is then empty
    /// and stays invalid.
    pub fn rebuild<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        root: &Path,
        limit: usize,
    ) -> Result<usize, FsError> {
        self.by_stem.clear();
        self.by_lower_stem.clear();
        self.paths.clear();
        self.valid = false;

        let found = fs.find_files(root, &is_markdown, limit)?;
        for path in found {
            let Some(stem) = stem_of(&path) else {
                continue;
            };
            self.by_stem
                .entry(stem.to_string())
                .or_default()
                .push(path.clone());
            self.by_lower_stem
                .entry(stem.to_lowercase())
                .or_default()
                .push(path.clone());
            self.paths.push(path);
        }

        self.valid = true;
        debug!(root = %root.display(), files = self.paths.len(), "rebuilt file index");
        Ok(self.paths.len())
    }

    /// Paths whose stem is exactly `stem`.
    pub fn lookup(&self, stem: &str) -> &[PathBuf] {
        self.by_stem.get(stem).map(Vec::as_slice).unwrap_or_default()
    }

    /// Paths whose stem equals `stem` ignoring case.
    pub fn lookup_ignore_case(&self, stem: &str) -> &[PathBuf] {
        self.by_lower_stem
            .get(&stem.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every indexed path, in discovery order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Distinct stems, sorted.
    pub fn stems(&self) -> Vec<&str> {
        let mut stems: Vec<&str> = self.by_stem.keys().map(String::as_str).collect();
        stems.sort_unstable();
        stems
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Marks the index for a rebuild on next use. Contents are kept.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFs;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn vault(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    #[test]
    fn new_index_is_invalid_and_empty() {
        let index = FileIndex::new();
        assert!(!index.is_valid());
        assert!(index.lookup("anything").is_empty());
    }

    #[test]
    fn rebuild_indexes_by_stem() {
        let dir = vault(&["one.md", "two.md", "notes.txt"]);
        let mut index = FileIndex::new();

        let count = index.rebuild(&RealFs, dir.path(), 100).unwrap();

        assert_eq!(count, 2);
        assert!(index.is_valid());
        assert_eq!(index.lookup("one"), [dir.path().join("one.md")]);
        assert!(index.lookup("notes").is_empty());
    }

    #[test]
    fn shared_stems_keep_discovery_order() {
        let dir = vault(&["a/x.md", "b/x.md"]);
        let mut index = FileIndex::new();
        index.rebuild(&RealFs, dir.path(), 100).unwrap();

        assert_eq!(
            index.lookup("x"),
            [dir.path().join("a/x.md"), dir.path().join("b/x.md")]
        );
    }

    #[test]
    fn lookup_ignore_case_matches_any_casing() {
        let dir = vault(&["Project Plan.md"]);
        let mut index = FileIndex::new();
        index.rebuild(&RealFs, dir.path(), 100).unwrap();

        assert!(index.lookup("project plan").is_empty());
        assert_eq!(
            index.lookup_ignore_case("PROJECT plan"),
            [dir.path().join("Project Plan.md")]
        );
    }

    #[test]
    fn rebuild_respects_scan_limit() {
        let dir = vault(&["a.md", "b.md", "c.md", "d.md"]);
        let mut index = FileIndex::new();

        assert_eq!(index.rebuild(&RealFs, dir.path(), 2).unwrap(), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn invalidate_keeps_contents() {
        let dir = vault(&["keep.md"]);
        let mut index = FileIndex::new();
        index.rebuild(&RealFs, dir.path(), 100).unwrap();

        index.invalidate();

        assert!(!index.is_valid());
        assert_eq!(index.lookup("keep").len(), 1);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let dir = vault(&["old.md"]);
        let mut index = FileIndex::new();
        index.rebuild(&RealFs, dir.path(), 100).unwrap();

        fs::remove_file(dir.path().join("old.md")).unwrap();
        fs::write(dir.path().join("new.md"), "").unwrap();
        index.rebuild(&RealFs, dir.path(), 100).unwrap();

        assert!(index.lookup("old").is_empty());
        assert_eq!(index.stems(), vec!["new"]);
    }

    #[test]
    fn rebuild_of_missing_root_fails_and_stays_invalid() {
        let mut index = FileIndex::new();
        let result = index.rebuild(&RealFs, Path::new("/nonexistent/root"), 100);

        assert!(result.is_err());
        assert!(!index.is_valid());
    }
}
