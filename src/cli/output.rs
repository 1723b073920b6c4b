//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Output format for the `graph` command.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum GraphFormat {
    /// Indented tree of outgoing links (default)
    #[default]
    Tree,
    /// Nodes and edges as JSON
    Json,
    /// Graphviz DOT
    Dot,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub name: String,
    pub title: String,
    pub path: String,
}

/// A resolved (or unresolved) link target.
#[derive(Debug, Serialize)]
pub struct LinkListing {
    pub target: String,
    pub path: Option<String>,
}

/// An alias and the note declaring it.
#[derive(Debug, Serialize)]
pub struct AliasListing {
    pub alias: String,
    pub path: String,
}

/// Result of `resolve`.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub token: String,
    pub path: String,
}

/// Result of `show`.
#[derive(Debug, Serialize)]
pub struct NoteDetails {
    pub note: Note,
    pub links: Vec<LinkListing>,
}
