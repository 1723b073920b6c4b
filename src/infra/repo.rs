//! Repository root detection.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Returns the version-control root containing `start`, or `start` itself.
///
/// Asks `git rev-parse --show-toplevel`; any failure (git missing, not a
/// repository, non-UTF-8 output) falls back to `start`.
pub fn detect_repository_root(start: &Path) -> PathBuf {
    let output = Command::new("git")
        .arg("-C")
        .arg(start)
        .args(["rev-parse", "--show-toplevel"])
        .output();

    match output {
        Ok(out) if out.status.success() => match String::from_utf8(out.stdout) {
            Ok(stdout) if !stdout.trim().is_empty() => {
                let root = PathBuf::from(stdout.trim());
                debug!(root = %root.display(), "detected repository root");
                root
            }
            _ => start.to_path_buf(),
        },
        _ => {
            debug!(start = %start.display(), "no repository root, using start directory");
            start.to_path_buf()
        }
    }
}
