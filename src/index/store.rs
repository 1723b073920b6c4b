//! The set of caches a note graph session owns.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::index::{AliasIndex, FileIndex, GraphCache, LinkCache};
use crate::infra::is_markdown;

/// Filesystem change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEvent {
    Created,
    Saved,
    Deleted,
}

/// Owns every index and cache.
///
/// Created once per session and passed by reference to the resolver and the
/// graph builder; invalidation goes through its methods.
#[derive(Debug)]
pub struct IndexStore {
    pub files: FileIndex,
    pub aliases: AliasIndex,
    pub links: LinkCache,
    pub graphs: GraphCache,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new(crate::settings::Settings::default().graph_ttl)
    }
}

impl IndexStore {
    pub fn new(graph_ttl: Duration) -> Self {
        Self {
            files: FileIndex::new(),
            aliases: AliasIndex::new(),
            links: LinkCache::new(),
            graphs: GraphCache::new(graph_ttl),
        }
    }

    /// Marks the file index for rebuild and forgets all aliases.
    pub fn invalidate(&mut self) {
        self.files.invalidate();
        self.aliases.clear();
    }

    /// Drops every cached result, including link and graph caches.
    pub fn invalidate_all(&mut self) {
        self.invalidate();
        self.links.clear();
        self.graphs.clear();
        debug!("invalidated all caches");
    }

    /// Reacts to a host file event. Non-Markdown paths are ignored.
    ///
    /// Returns true if the event invalidated anything.
    pub fn on_file_event(&mut self, path: &Path, event: FileEvent) -> bool {
        if !is_markdown(path) {
            return false;
        }
        debug!(path = %path.display(), ?event, "markdown file changed");
        self.invalidate();
        if event == FileEvent::Deleted {
            self.links.remove(path);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFs;
    use std::fs;
    use tempfile::TempDir;

    fn populated_store(dir: &TempDir) -> (IndexStore, std::path::PathBuf) {
        let path = dir.path().join("note.md");
        fs::write(&path, "---\nalias: nick\n---\n[[other]]\n").unwrap();

        let mut store = IndexStore::default();
        store.files.rebuild(&RealFs, dir.path(), 100).unwrap();
        store.aliases.ensure_scanned(&RealFs, &path, 10);
        store.links.extract(&RealFs, &path, 100);
        (store, path)
    }

    #[test]
    fn markdown_event_invalidates_files_and_aliases() {
        let dir = TempDir::new().unwrap();
        let (mut store, path) = populated_store(&dir);

        assert!(store.on_file_event(&path, FileEvent::Saved));

        assert!(!store.files.is_valid());
        assert!(store.aliases.lookup("nick").is_none());
        assert_eq!(store.files.lookup("note").len(), 1);
        assert_eq!(store.links.len(), 1);
    }

    #[test]
    fn delete_event_drops_link_entry() {
        let dir = TempDir::new().unwrap();
        let (mut store, path) = populated_store(&dir);

        store.on_file_event(&path, FileEvent::Deleted);

        assert!(store.links.get(&path).is_none());
    }

    #[test]
    fn non_markdown_event_is_ignored() {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = populated_store(&dir);

        assert!(!store.on_file_event(&dir.path().join("image.png"), FileEvent::Created));
        assert!(store.files.is_valid());
    }

    #[test]
    fn invalidate_all_clears_content_caches() {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = populated_store(&dir);

        store.invalidate_all();

        assert!(!store.files.is_valid());
        assert!(store.aliases.is_empty());
        assert!(store.links.is_empty());
        assert!(store.graphs.is_empty());
    }
}
