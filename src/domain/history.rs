//! Linear back/forward navigation history.

use std::path::{Path, PathBuf};

/// Default number of entries kept before the oldest are dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Direction of a history step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

/// Ordered list of visited notes with a cursor.
///
/// Moving back or forward only shifts the cursor. Visiting a new note while
/// the cursor is not at the end discards the entries after it (linear undo).
///
/// # Examples
///
/// ```
/// use notegraph::domain::{Direction, NavigationHistory};
/// use std::path::PathBuf;
///
/// let mut history = NavigationHistory::default();
/// history.visit(PathBuf::from("a.md"));
/// history.visit(PathBuf::from("b.md"));
///
/// let (index, _) = history.peek(Direction::Back).unwrap();
/// history.seek(index);
/// history.visit(PathBuf::from("c.md"));
///
/// assert_eq!(history.entries(), [PathBuf::from("a.md"), PathBuf::from("c.md")]);
/// ```
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<PathBuf>,
    index: Option<usize>,
    limit: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl NavigationHistory {
    /// Creates an empty history keeping at most `limit` entries (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            limit: limit.max(1),
        }
    }

    /// Records a visit to `path`.
    ///
    /// Returns false (and changes nothing) when `path` is already current.
    pub fn visit(&mut self, path: PathBuf) -> bool {
        if self.current() == Some(path.as_path()) {
            return false;
        }

        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(path);

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.index = Some(self.entries.len() - 1);
        true
    }

    /// Returns the entry one step in `direction`, without moving.
    pub fn peek(&self, direction: Direction) -> Option<(usize, &Path)> {
        let current = self.index?;
        let target = match direction {
            Direction::Back => current.checked_sub(1)?,
            Direction::Forward => current + 1,
        };
        self.entries.get(target).map(|p| (target, p.as_path()))
    }

    /// Moves the cursor to `index`. Out-of-range indices are ignored.
    pub fn seek(&mut self, index: usize) {
        if index < self.entries.len() {
            self.index = Some(index);
        }
    }

    pub fn current(&self) -> Option<&Path> {
        self.index
            .and_then(|i| self.entries.get(i))
            .map(PathBuf::as_path)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }
}
