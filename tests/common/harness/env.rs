//! Isolated test environment with temp directory.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use super::{NoteGraphCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands run with `--dir` pointing at it and with a config file path
/// inside the temp directory, so the user's config never leaks in.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
    /// Path handed to the binary as its config file
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        std::fs::create_dir(&notes_dir).expect("Failed to create notes directory");
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_path,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the absolute path of `rel` inside the notes directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.notes_dir.join(rel)
    }

    /// Adds a test note to the environment and returns its path.
    pub fn add_note(&self, note: &TestNote) -> PathBuf {
        self.write_file(&note.file_name(), &note.render())
    }

    /// Writes a file (creating parent directories) and returns its path.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a file from the notes directory.
    pub fn read_file(&self, rel: &str) -> String {
        std::fs::read_to_string(self.notes_dir.join(rel)).expect("Failed to read file")
    }

    /// Writes the config file the binary will load.
    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Creates a NoteGraphCommand configured for this test environment.
    pub fn cmd(&self) -> NoteGraphCommand {
        NoteGraphCommand::new()
            .config(&self.config_path)
            .dir(&self.notes_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_notes_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_in_subdirectory() {
        let env = TestEnv::new();
        let path = env.add_note(&TestNote::new("sub/deep").body("x"));

        assert_eq!(path, env.path("sub/deep.md"));
        assert_eq!(env.read_file("sub/deep.md"), "x");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.notes_dir().to_string_lossy());
    }
}
