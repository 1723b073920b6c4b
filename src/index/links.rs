//! Link extraction and the per-file link cache.
//!
//! Two syntaxes are recognized, by pattern matching rather than Markdown
//! parsing: `[[name]]` wiki-links and `[label](target)` links whose target is
//! a note (a `.md` file or an extension-less path).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::trace;

use crate::infra::{FileSystem, MARKDOWN_EXTENSION};

/// Matches either `[[name]]` (group 1) or `[label](target)` (groups 2, 3).
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]]+)\]\]|\[([^\[\]]*)\]\(([^()]+)\)").expect("link pattern is valid")
});

/// Which syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Wiki,
    Markdown,
}

/// A link occurrence within one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSpan {
    /// Link token as stored in the cache.
    pub target: String,
    pub kind: LinkKind,
    /// Byte range of the whole link in the line.
    pub start: usize,
    pub end: usize,
}

/// Returns every note link in `line`, in order of appearance.
///
/// Duplicates are kept.
///
/// # Examples
///
/// ```
/// use notegraph::index::extract_links;
///
/// let links = extract_links("See [[note2]] and [bare](note3), not ![img](image.png)");
/// assert_eq!(links, vec!["note2", "note3"]);
/// ```
pub fn extract_links(line: &str) -> Vec<String> {
    link_spans(line).into_iter().map(|span| span.target).collect()
}

/// Returns the link whose span contains byte `column`, if any.
pub fn link_at(line: &str, column: usize) -> Option<LinkSpan> {
    link_spans(line)
        .into_iter()
        .find(|span| span.start <= column && column < span.end)
}

/// Returns every note link in `line` with its position.
pub fn link_spans(line: &str) -> Vec<LinkSpan> {
    LINK.captures_iter(line).filter_map(|caps| to_span(&caps)).collect()
}

fn to_span(caps: &Captures<'_>) -> Option<LinkSpan> {
    let whole = caps.get(0)?;
    let (target, kind) = if let Some(name) = caps.get(1) {
        let name = name.as_str();
        if name.trim().is_empty() {
            return None;
        }
        (name.to_string(), LinkKind::Wiki)
    } else {
        (note_target(caps.get(3)?.as_str())?, LinkKind::Markdown)
    };
    Some(LinkSpan {
        target,
        kind,
        start: whole.start(),
        end: whole.end(),
    })
}

/// Reduces a `[label](target)` target to a note token, or rejects it.
///
/// Accepts `.md` targets (suffix stripped) and extension-less targets;
/// rejects URLs, pure anchors and other file types.
fn note_target(raw: &str) -> Option<String> {
    // `(target "Title")` and `(<target>)` forms
    let target = raw.split_whitespace().next()?;
    let target = target
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(target);

    if is_external(target) {
        return None;
    }

    let target = target.split('#').next().unwrap_or_default();
    if target.is_empty() {
        return None;
    }

    match Path::new(target).extension() {
        None => Some(target.to_string()),
        Some(ext) if ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION) => {
            Some(target[..target.len() - MARKDOWN_EXTENSION.len() - 1].to_string())
        }
        Some(_) => None,
    }
}

fn is_external(target: &str) -> bool {
    let lower = target.to_lowercase();
    lower.contains("://") || lower.starts_with("mailto:") || lower.starts_with("tel:")
}

/// Cached links of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    links: Vec<String>,
    modified: SystemTime,
}

impl LinkEntry {
    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// True when the file changed after extraction.
    ///
    /// Only a *newer* time counts: a file whose mtime moves backwards keeps
    /// serving the cached links.
    pub fn is_stale(&self, current: SystemTime) -> bool {
        current > self.modified
    }
}

/// Per-file link cache keyed by modification time.
#[derive(Debug, Default)]
pub struct LinkCache {
    entries: HashMap<PathBuf, LinkEntry>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the links of `path`, re-reading it only when it changed.
    ///
    /// At most `line_cap` lines are scanned. Missing or unreadable files have
    /// no links.
    pub fn extract<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        path: &Path,
        line_cap: usize,
    ) -> Vec<String> {
        let Ok(modified) = fs.modified(path) else {
            return Vec::new();
        };

        if let Some(entry) = self.entries.get(path) {
            if !entry.is_stale(modified) {
                trace!(path = %path.display(), "link cache hit");
                return entry.links.clone();
            }
        }

        let Ok(lines) = fs.read_lines(path, line_cap) else {
            return Vec::new();
        };
        let links: Vec<String> = lines.iter().flat_map(|line| extract_links(line)).collect();
        trace!(path = %path.display(), links = links.len(), "extracted links");

        self.entries.insert(
            path.to_path_buf(),
            LinkEntry {
                links: links.clone(),
                modified,
            },
        );
        links
    }

    pub fn get(&self, path: &Path) -> Option<&LinkEntry> {
        self.entries.get(path)
    }

    pub fn remove(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
