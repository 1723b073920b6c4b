//! Tunable limits shared by the index, resolver, graph builder and navigator.

use std::time::Duration;

/// Limits and defaults for a note graph session.
///
/// Built from the config file by `Config::settings()`; `Default` holds the
/// values used when nothing is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Maximum number of Markdown files indexed per rebuild.
    pub scan_limit: usize,
    /// Lines read from the top of a file when looking for frontmatter.
    pub frontmatter_lines: usize,
    /// Lines scanned per file when extracting links.
    pub link_line_cap: usize,
    /// How long a built graph is served from cache.
    pub graph_ttl: Duration,
    /// Maximum traversal depth of the link graph.
    pub max_depth: usize,
    /// Entries kept in the navigation history.
    pub history_limit: usize,
    /// Window after a back/forward step during which document-open events
    /// are not recorded.
    pub settle: Duration,
    /// Write a `title`/`created` frontmatter block into new notes.
    pub new_note_frontmatter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_limit: 1000,
            frontmatter_lines: 10,
            link_line_cap: 100,
            graph_ttl: Duration::from_millis(5000),
            max_depth: 3,
            history_limit: crate::domain::DEFAULT_HISTORY_LIMIT,
            settle: Duration::from_millis(50),
            new_note_frontmatter: false,
        }
    }
}
