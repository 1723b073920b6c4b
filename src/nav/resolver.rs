//! Resolution of link tokens to note files.

use std::path::{Component, Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use super::NavError;
use crate::index::IndexStore;
use crate::infra::{FileSystem, FsError, MARKDOWN_EXTENSION, stem_of};
use crate::settings::Settings;

/// True for a non-empty path made only of normal components, so joining it
/// onto a directory stays inside that directory.
fn is_plain_relative(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Result of [`Resolver::create_if_missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteCreation {
    /// A new file was written.
    Created(PathBuf),
    /// The token already resolved to this file.
    Existing(PathBuf),
}

impl NoteCreation {
    pub fn path(&self) -> &Path {
        match self {
            NoteCreation::Created(path) | NoteCreation::Existing(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            NoteCreation::Created(path) | NoteCreation::Existing(path) => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, NoteCreation::Created(_))
    }
}

/// Reduces a raw link token to the note name it refers to.
///
/// Drops a `|display` part, a `#heading` part and a `.md` suffix.
///
/// # Examples
///
/// ```
/// use notegraph::nav::normalize_token;
///
/// assert_eq!(normalize_token(" Ideas.md "), "Ideas");
/// assert_eq!(normalize_token("Ideas#Later|see later"), "Ideas");
/// ```
pub fn normalize_token(token: &str) -> &str {
    let token = token.split('|').next().unwrap_or_default();
    let token = token.split('#').next().unwrap_or_default().trim();
    let suffix_len = MARKDOWN_EXTENSION.len() + 1;
    let has_suffix = token.len() > suffix_len
        && token.is_char_boundary(token.len() - suffix_len)
        && token[token.len() - suffix_len..].eq_ignore_ascii_case(".md");
    if has_suffix {
        &token[..token.len() - suffix_len]
    } else {
        token
    }
}

/// Resolves link tokens against the file and alias indexes.
///
/// Resolution order:
/// 1. Path-like tokens (`dir/note`) that exist next to the active note or
///    under the root
/// 2. Alias match (case-insensitive)
/// 3. Exact stem match
/// 4. Case-insensitive stem match
/// 5. Aliases of files not scanned yet, one file at a time
///
/// Stem matches prefer a file in the active note's directory, else the first
/// one discovered.
pub struct Resolver<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
    settings: &'a Settings,
}

impl<'a, F: FileSystem + ?Sized> Resolver<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path, settings: &'a Settings) -> Self {
        Self { fs, root, settings }
    }

    /// Rebuilds the file index if it was invalidated.
    pub fn ensure_index(&self, store: &mut IndexStore) {
        if store.files.is_valid() {
            return;
        }
        if let Err(err) = store
            .files
            .rebuild(self.fs, self.root, self.settings.scan_limit)
        {
            warn!(root = %self.root.display(), error = %err, "cannot index notes");
        }
    }

    /// Resolves `token` to a single note file.
    ///
    /// `active` is the note the link was followed from, if any.
    pub fn resolve(
        &self,
        store: &mut IndexStore,
        token: &str,
        active: Option<&Path>,
    ) -> Option<PathBuf> {
        let name = normalize_token(token);
        if name.is_empty() {
            return None;
        }
        self.ensure_index(store);
        let active_dir = active.and_then(Path::parent);

        if name.contains('/') {
            let file_name = format!("{name}.{MARKDOWN_EXTENSION}");
            for base in active_dir.into_iter().chain([self.root]) {
                let candidate = base.join(&file_name);
                if self.fs.exists(&candidate) {
                    return Some(candidate);
                }
            }
        }

        if let Some(path) = store.aliases.lookup(name) {
            return Some(path.to_path_buf());
        }

        if let Some(path) = prefer_directory(store.files.lookup(name), active_dir) {
            return Some(path.clone());
        }

        if let Some(path) = prefer_directory(store.files.lookup_ignore_case(name), active_dir) {
            return Some(path.clone());
        }

        let pending: Vec<PathBuf> = store
            .files
            .paths()
            .iter()
            .filter(|p| !store.aliases.is_scanned(p))
            .cloned()
            .collect();
        for path in pending {
            store
                .aliases
                .ensure_scanned(self.fs, &path, self.settings.frontmatter_lines);
            if let Some(hit) = store.aliases.lookup(name) {
                debug!(token = name, path = %hit.display(), "resolved by alias scan");
                return Some(hit.to_path_buf());
            }
        }

        debug!(token = name, "unresolved link");
        None
    }

    /// Returns the note for `token`, creating it if nothing resolves.
    ///
    /// New notes go next to the active note, else in the root, and start with
    /// a `# title` heading (`title` defaults to the note name).
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidToken` for an empty name or one that is not a
    /// plain relative path (absolute, or with `.`/`..` components), and
    /// `NavError::Write` if the file cannot be written.
    pub fn create_if_missing(
        &self,
        store: &mut IndexStore,
        token: &str,
        title: Option<&str>,
        active: Option<&Path>,
    ) -> Result<NoteCreation, NavError> {
        let name = normalize_token(token);
        if !is_plain_relative(name) {
            return Err(NavError::InvalidToken {
                token: token.to_string(),
            });
        }

        if let Some(existing) = self.resolve(store, token, active) {
            return Ok(NoteCreation::Existing(existing));
        }

        let dir = active.and_then(Path::parent).unwrap_or(self.root);
        let path = dir.join(format!("{name}.{MARKDOWN_EXTENSION}"));

        // Appeared since the index was built.
        if self.fs.exists(&path) {
            store.invalidate();
            return Ok(NoteCreation::Existing(path));
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| stem_of(&path))
            .unwrap_or(name);
        let lines = new_note_lines(title, self.settings.new_note_frontmatter);

        match self.fs.write_lines(&path, &lines) {
            Ok(()) => {}
            Err(FsError::AlreadyExists { .. }) => {
                store.invalidate();
                return Ok(NoteCreation::Existing(path));
            }
            Err(source) => return Err(NavError::Write { path, source }),
        }

        store.invalidate();
        info!(path = %path.display(), "created note");
        Ok(NoteCreation::Created(path))
    }
}

fn prefer_directory<'p>(candidates: &'p [PathBuf], dir: Option<&Path>) -> Option<&'p PathBuf> {
    dir.and_then(|dir| candidates.iter().find(|c| c.parent() == Some(dir)))
        .or_else(|| candidates.first())
}

/// Initial contents of a new note titled `title`.
pub fn new_note_lines(title: &str, with_frontmatter: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if with_frontmatter {
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        lines.push("---".to_string());
        lines.push(format!("title: {}", yaml_scalar(title)));
        lines.push(format!("created: {created}"));
        lines.push("---".to_string());
        lines.push(String::new());
    }
    lines.push(format!("# {title}"));
    lines.push(String::new());
    lines
}

fn yaml_scalar(value: &str) -> String {
    let needs_quotes = value.contains(": ")
        || value.starts_with(['\'', '"', '[', '-', '#'])
        || value.ends_with(':');
    if needs_quotes && !value.contains('"') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
