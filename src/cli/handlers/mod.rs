//! Command handlers for the CLI.

mod graph;
mod links;
mod list;
mod resolve;
mod session;


use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::terminal::TerminalEditor;
use crate::infra::{Editor, FileSystem, RealFs, is_markdown};
use crate::session::Session;
use crate::settings::Settings;

// Re-export public items
pub use graph::handle_graph;
pub use links::{handle_links, handle_show};
pub use list::{handle_aliases, handle_list};
pub use resolve::{handle_new, handle_resolve};
pub use session::{ReplCommand, handle_session, run_repl};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens a session on `root` with `from` as the active document.
pub(crate) fn open_session(
    root: &Path,
    settings: Settings,
    from: Option<&Path>,
) -> Session<RealFs, TerminalEditor> {
    let active = from.map(absolute);
    Session::new(
        RealFs,
        TerminalEditor::new(active),
        root.to_path_buf(),
        settings,
    )
}

pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Returns the Markdown file `note` names as a path, absolute, relative to
/// the working directory or relative to the notes root.
pub(crate) fn note_file<F: FileSystem, E: Editor>(
    session: &Session<F, E>,
    note: &str,
) -> Option<PathBuf> {
    [absolute(Path::new(note)), session.root().join(note)]
        .into_iter()
        .find(|p| is_markdown(p) && session.fs().exists(p))
}

/// Finds a note given either a file path or a link target.
pub(crate) fn locate_note<F: FileSystem, E: Editor>(
    session: &mut Session<F, E>,
    note: &str,
) -> Result<PathBuf> {
    if let Some(path) = note_file(session, note) {
        return Ok(path);
    }
    session
        .resolve_link(note)
        .with_context(|| format!("note not found: '{note}'"))
}

/// Shows `path` relative to the notes root when it is inside it.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
