//! Editor capability: the parts of the host editor the note graph drives.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Host editor operations (allows mocking in tests).
pub trait Editor {
    /// Path of the document currently shown, if any.
    fn active_document(&self) -> Option<PathBuf>;

    /// Shows `path`, making it the active document.
    ///
    /// Hosts that emit a "document opened" event should route it to
    /// `Session::on_document_opened`.
    fn open_document(&mut self, path: &Path);

    /// Shows a fire-and-forget message to the user.
    fn notify(&mut self, message: &str, severity: Severity);
}
