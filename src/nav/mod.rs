//! Link resolution, note creation and navigation history

mod navigator;
mod resolver;

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::FsError;

pub use navigator::{Navigator, Step};
pub use resolver::{NoteCreation, Resolver, new_note_lines, normalize_token};

/// Errors from user-facing navigation actions.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("no note found for '{token}'")]
    NotFound { token: String },

    #[error("'{token}' is not a valid note name")]
    InvalidToken { token: String },

    #[error("failed to create note {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("note no longer exists: {path}")]
    StaleTarget { path: PathBuf },

    #[error("no active document")]
    NoActiveDocument,
}
