//! Note type: a Markdown file plus the metadata its frontmatter declares.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::infra::{FileSystem, Frontmatter, FsError, read_frontmatter, stem_of};

/// A Markdown note identified by its absolute path.
///
/// Frontmatter-derived fields are optional; a note without frontmatter is
/// still a note, titled by its stem.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use notegraph::domain::Note;
/// use std::path::PathBuf;
///
/// let note = Note::new(PathBuf::from("/notes/Rust Tips.md"), Utc::now());
/// assert_eq!(note.stem(), "Rust Tips");
/// assert_eq!(note.display_title(), "Rust Tips");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    path: PathBuf,
    stem: String,
    modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
}

impl Note {
    /// Creates a note with no frontmatter metadata.
    pub fn new(path: PathBuf, modified: DateTime<Utc>) -> Self {
        let stem = stem_of(&path).unwrap_or_default().to_string();
        Self {
            path,
            stem,
            modified,
            title: None,
            aliases: Vec::new(),
            tags: Vec::new(),
            created: None,
        }
    }

    /// Loads a note's metadata from the filesystem.
    ///
    /// Only the first `max_lines` lines are inspected for frontmatter.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` if the file's modification time cannot be
    /// read (the file is missing).
    pub fn load<F: FileSystem + ?Sized>(
        fs: &F,
        path: &Path,
        max_lines: usize,
    ) -> Result<Self, FsError> {
        let modified = fs.modified(path)?;
        let note = Self::new(path.to_path_buf(), modified.into());
        Ok(match read_frontmatter(fs, path, max_lines) {
            Some(fm) => note.with_frontmatter(&fm),
            None => note,
        })
    }

    /// Applies `title`, `alias`/`aliases`, `tags` and `created` fields.
    pub fn with_frontmatter(mut self, fm: &Frontmatter) -> Self {
        self.title = fm
            .scalar("title")
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.aliases = fm
            .strings("alias")
            .into_iter()
            .chain(fm.strings("aliases"))
            .map(str::to_string)
            .collect();
        self.tags = fm.strings("tags").into_iter().map(str::to_string).collect();
        self.created = fm
            .scalar("created")
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the frontmatter title, or the stem when there is none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.stem)
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }
}
