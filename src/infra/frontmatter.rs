//! Restricted frontmatter parser for note metadata.
//!
//! Only the subset of YAML that notes actually use is understood: flat
//! `key: value` pairs, block lists (`- item`) and single-level flow lists
//! (`[a, b]`). Anything else is skipped rather than reported, so a malformed
//! block degrades to "fewer keys" instead of an error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::infra::fs::FileSystem;

/// Opening (and closing) delimiter line.
const DELIMITER: &str = "---";
/// Alternative YAML document-end marker accepted as a closing line.
const DOCUMENT_END: &str = "...";

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+):\s*(.*)$").expect("key/value pattern is valid")
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+(.*)$").expect("list item pattern is valid"));

/// A frontmatter value: either a scalar or a single-level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FrontmatterValue {
    /// Returns the value as a list of strings (a scalar becomes one item).
    pub fn items(&self) -> Vec<&str> {
        match self {
            FrontmatterValue::Scalar(s) => vec![s.as_str()],
            FrontmatterValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Parsed frontmatter, keys in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Returns the scalar value for `key`, if it is a scalar.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            FrontmatterValue::Scalar(s) => Some(s),
            FrontmatterValue::List(_) => None,
        }
    }

    /// Returns the items of `key`, treating a scalar as a one-item list.
    ///
    /// Empty items are dropped.
    pub fn strings(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|v| v.items().into_iter().filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, key: &str, value: FrontmatterValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// Reads and parses the frontmatter at the top of `path`.
///
/// At most `max_lines` lines are read. Returns `None` when the file cannot be
/// read, does not open with `---`, or is not closed within those lines.
pub fn read_frontmatter<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    max_lines: usize,
) -> Option<Frontmatter> {
    let lines = fs.read_lines(path, max_lines).ok()?;
    parse_frontmatter(&lines)
}

/// Parses frontmatter from the leading lines of a file.
///
/// # Format
/// ```text
/// ---
/// title: API Design
/// alias: api
/// aliases:
///   - "Interfaces"
///   - endpoints
/// tags: [design, 'rest']
/// ---
/// ```
pub fn parse_frontmatter<S: AsRef<str>>(lines: &[S]) -> Option<Frontmatter> {
    let first = lines.first()?.as_ref();
    let first = first.strip_prefix('\u{FEFF}').unwrap_or(first);
    if first.trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let body: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.as_ref().trim_end_matches('\r'))
        .collect();
    let end = body
        .iter()
        .position(|l| *l == DELIMITER || *l == DOCUMENT_END)?;
    let body = &body[..end];

    let mut frontmatter = Frontmatter::default();
    let mut i = 0;
    while i < body.len() {
        let Some(caps) = KEY_VALUE.captures(body[i]) else {
            i += 1;
            continue;
        };
        let key = &caps[1];
        let raw = caps[2].trim();
        i += 1;

        if raw.is_empty() {
            let mut items = Vec::new();
            while let Some(item) = body.get(i).and_then(|l| LIST_ITEM.captures(l)) {
                items.push(unquote(item[1].trim()).to_string());
                i += 1;
            }
            if items.is_empty() {
                frontmatter.insert(key, FrontmatterValue::Scalar(String::new()));
            } else {
                frontmatter.insert(key, FrontmatterValue::List(items));
            }
        } else if let Some(items) = flow_list(raw) {
            frontmatter.insert(key, FrontmatterValue::List(items));
        } else {
            frontmatter.insert(key, FrontmatterValue::Scalar(unquote(raw).to_string()));
        }
    }

    Some(frontmatter)
}

/// Parses `[a, "b", 'c']` into its items. Nested brackets are not supported.
fn flow_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains('[') || inner.contains(']') {
        return None;
    }
    Some(
        inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// Strips one level of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
