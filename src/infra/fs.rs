//! Filesystem capability used by every index and cache.
//!
//! The core never touches `std::fs` directly; it goes through [`FileSystem`]
//! so that hosts (and tests) can observe or replace the I/O.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

/// File extension of notes, without the dot.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Errors during filesystem operations on notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("write failed for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate read-side FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            _ => FsError::NotReadable {
                path: path.into(),
                source: error,
            },
        }
    }

    fn write(path: &Path, error: io::Error) -> Self {
        FsError::Write {
            path: path.into(),
            source: error,
        }
    }
}

/// The filesystem operations the note graph needs from its host.
pub trait FileSystem {
    /// Reads at most `max_lines` lines, without line terminators.
    fn read_lines(&self, path: &Path, max_lines: usize) -> Result<Vec<String>, FsError>;

    /// Writes `lines` to a new file. Refuses to replace an existing file.
    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), FsError>;

    /// Returns true if a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns the last modification time of `path`.
    fn modified(&self, path: &Path) -> Result<SystemTime, FsError>;

    /// Walks `root` and returns up to `limit` files accepted by `predicate`.
    fn find_files(
        &self,
        root: &Path,
        predicate: &dyn Fn(&Path) -> bool,
        limit: usize,
    ) -> Result<Vec<PathBuf>, FsError>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read_lines(&self, path: &Path, max_lines: usize) -> Result<Vec<String>, FsError> {
        let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines().take(max_lines) {
            let mut line = line.map_err(|e| FsError::from_io(path, e))?;
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        trace!(path = %path.display(), lines = lines.len(), "read lines");
        Ok(lines)
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), FsError> {
        if path.exists() {
            return Err(FsError::AlreadyExists { path: path.into() });
        }

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::write(path, e))?;

        let mut content = lines.join("\n");
        content.push('\n');

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::write(path, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| FsError::write(path, e))?;

        // No-clobber rename: a file that appeared since the check above wins.
        temp.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                FsError::AlreadyExists { path: path.into() }
            } else {
                FsError::write(path, e.error)
            }
        })?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, FsError> {
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| FsError::from_io(path, e))
    }

    fn find_files(
        &self,
        root: &Path,
        predicate: &dyn Fn(&Path) -> bool,
        limit: usize,
    ) -> Result<Vec<PathBuf>, FsError> {
        if !root.exists() {
            return Err(FsError::NotFound { path: root.into() });
        }
        if !root.is_dir() {
            return Err(FsError::NotADirectory { path: root.into() });
        }

        let mut found = Vec::new();
        if limit == 0 {
            return Ok(found);
        }
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            if found.len() >= limit {
                warn!(root = %root.display(), limit, "scan limit reached");
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && predicate(entry.path()) {
                found.push(entry.into_path());
            }
        }

        Ok(found)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// Returns true if `path` has the Markdown extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MARKDOWN_EXTENSION)
}

/// Returns the file name of `path` without directory or extension.
pub fn stem_of(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
