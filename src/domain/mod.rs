//! Core types: Note, LinkGraph, NavigationHistory

mod graph;
mod history;
mod note;

pub use graph::{GraphNode, LinkGraph};
pub use history::{DEFAULT_HISTORY_LIMIT, Direction, NavigationHistory};
pub use note::Note;
