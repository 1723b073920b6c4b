//! Editor backed by the terminal: the active document is just a path.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::infra::{Editor, Severity};

/// [`Editor`] for command-line use.
///
/// Opening a document only makes it active. Notifications are echoed to
/// stderr in interactive sessions and logged otherwise.
#[derive(Debug, Default)]
pub struct TerminalEditor {
    active: Option<PathBuf>,
    echo: bool,
}

impl TerminalEditor {
    pub fn new(active: Option<PathBuf>) -> Self {
        Self {
            active,
            echo: false,
        }
    }

    /// Print notifications to stderr.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Editor for TerminalEditor {
    fn active_document(&self) -> Option<PathBuf> {
        self.active.clone()
    }

    fn open_document(&mut self, path: &Path) {
        self.active = Some(path.to_path_buf());
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        if self.echo {
            eprintln!("{severity}: {message}");
            return;
        }
        match severity {
            Severity::Info => info!("{message}"),
            Severity::Warn | Severity::Error => warn!("{message}"),
        }
    }
}
