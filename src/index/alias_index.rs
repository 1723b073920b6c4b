//! Lazily built alias → path index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::infra::{FileSystem, read_frontmatter};

/// Outcome of scanning one file's frontmatter for aliases.
///
/// A path with no entry in the index has not been scanned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasScan {
    /// Scanned; declares no alias this file owns.
    NoAlias,
    /// Scanned; lowercased aliases that resolve to this file.
    Aliases(Vec<String>),
}

/// Case-insensitive alias index filled one file at a time.
///
/// Each path's frontmatter is parsed at most once until [`clear`] is called.
/// When two files declare the same alias, the file scanned first keeps it.
///
/// [`clear`]: AliasIndex::clear
#[derive(Debug, Default)]
pub struct AliasIndex {
    aliases: HashMap<String, PathBuf>,
    scanned: HashMap<PathBuf, AliasScan>,
}

impl AliasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `path` for `alias`/`aliases` fields unless already scanned.
    ///
    /// Returns true if the file was scanned by this call.
    pub fn ensure_scanned<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        path: &Path,
        max_lines: usize,
    ) -> bool {
        if self.scanned.contains_key(path) {
            return false;
        }

        let mut owned = Vec::new();
        if let Some(fm) = read_frontmatter(fs, path, max_lines) {
            for alias in fm.strings("alias").into_iter().chain(fm.strings("aliases")) {
                let alias = alias.trim().to_lowercase();
                if alias.is_empty() {
                    continue;
                }
                match self.aliases.get(&alias) {
                    Some(existing) if existing != path => {
                        debug!(
                            alias = %alias,
                            owner = %existing.display(),
                            ignored = %path.display(),
                            "alias already claimed"
                        );
                    }
                    Some(_) => {}
                    None => {
                        self.aliases.insert(alias.clone(), path.to_path_buf());
                        owned.push(alias);
                    }
                }
            }
        }

        trace!(path = %path.display(), aliases = owned.len(), "scanned aliases");
        let state = if owned.is_empty() {
            AliasScan::NoAlias
        } else {
            AliasScan::Aliases(owned)
        };
        self.scanned.insert(path.to_path_buf(), state);
        true
    }

    /// Looks up `name` ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Path> {
        self.aliases
            .get(&name.trim().to_lowercase())
            .map(PathBuf::as_path)
    }

    /// Scan state of `path`; `None` means not scanned yet.
    pub fn scan_state(&self, path: &Path) -> Option<&AliasScan> {
        self.scanned.get(path)
    }

    pub fn is_scanned(&self, path: &Path) -> bool {
        self.scanned.contains_key(path)
    }

    /// All known aliases sorted by alias.
    pub fn entries(&self) -> Vec<(&str, &Path)> {
        let mut entries: Vec<(&str, &Path)> = self
            .aliases
            .iter()
            .map(|(alias, path)| (alias.as_str(), path.as_path()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Forgets every alias and scan state.
    pub fn clear(&mut self) {
        self.aliases.clear();
        self.scanned.clear();
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
