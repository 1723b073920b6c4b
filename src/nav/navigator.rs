//! Back/forward navigation over the visit history.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::trace;

use super::NavError;
use crate::domain::{Direction, NavigationHistory};
use crate::infra::FileSystem;

/// Outcome of a history step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved(PathBuf),
    /// Nothing further in that direction.
    AtEdge,
}

/// Records visited notes and replays them.
///
/// Opening the target of a back/forward step makes the host report a
/// document-open, which must not be recorded as a new visit. Each step opens
/// a replay window (`now + settle`) during which [`Navigator::navigate`] is a
/// no-op.
#[derive(Debug)]
pub struct Navigator {
    history: NavigationHistory,
    settle: Duration,
    replay_until: Option<Instant>,
}

impl Navigator {
    pub fn new(history_limit: usize, settle: Duration) -> Self {
        Self {
            history: NavigationHistory::new(history_limit),
            settle,
            replay_until: None,
        }
    }

    /// Records a visit to `path`. Returns whether the history changed.
    pub fn navigate(&mut self, path: PathBuf, now: Instant) -> bool {
        if self.is_replaying(now) {
            trace!(path = %path.display(), "open during replay, not recorded");
            return false;
        }
        self.replay_until = None;
        self.history.visit(path)
    }

    pub fn is_replaying(&self, now: Instant) -> bool {
        self.replay_until.is_some_and(|until| now < until)
    }

    /// Closes the replay window early, e.g. for an explicit user navigation.
    pub fn end_replay(&mut self) {
        self.replay_until = None;
    }

    pub fn back<F: FileSystem + ?Sized>(&mut self, fs: &F, now: Instant) -> Result<Step, NavError> {
        self.step(fs, Direction::Back, now)
    }

    pub fn forward<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        now: Instant,
    ) -> Result<Step, NavError> {
        self.step(fs, Direction::Forward, now)
    }

    /// Moves one entry in `direction`.
    ///
    /// # Errors
    ///
    /// Returns `NavError::StaleTarget` without moving if the target file was
    /// removed.
    pub fn step<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        direction: Direction,
        now: Instant,
    ) -> Result<Step, NavError> {
        let Some((index, target)) = self.history.peek(direction) else {
            return Ok(Step::AtEdge);
        };
        if !fs.exists(target) {
            return Err(NavError::StaleTarget {
                path: target.to_path_buf(),
            });
        }
        let target = target.to_path_buf();
        self.history.seek(index);
        self.replay_until = Some(now + self.settle);
        Ok(Step::Moved(target))
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.replay_until = None;
    }
}
