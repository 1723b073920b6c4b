//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `notegraph` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct NoteGraphCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
    stdin: Option<String>,
}

impl NoteGraphCommand {
    /// Creates a new command for the `notegraph` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
            stdin: None,
        }
    }

    /// Sets the `--dir` option to specify the notes directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `NOTEGRAPH_CONFIG` at `path`.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Feeds `input` to the process's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notegraph").expect("Failed to find notegraph binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        if let Some(config) = &self.config {
            cmd.env("NOTEGRAPH_CONFIG", config);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `resolve` command with a token.
    pub fn resolve(self, token: &str) -> Self {
        self.args(["resolve", token])
    }

    /// Configures for the `new` command with a token.
    pub fn new_note(self, token: &str) -> Self {
        self.args(["new", token])
    }

    /// Configures for the `links` command.
    pub fn links(self, note: &str) -> Self {
        self.args(["links", note])
    }

    /// Configures for the `graph` command starting at `note`.
    pub fn graph(self, note: &str) -> Self {
        self.args(["graph", note])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `aliases` command.
    pub fn aliases(self) -> Self {
        self.args(["aliases"])
    }

    /// Configures for the `show` command.
    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    /// Configures for the `session` command.
    pub fn session(self) -> Self {
        self.args(["session"])
    }

    /// Adds `--from <path>`.
    pub fn from(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        self.args(["--from", path.as_str()])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for NoteGraphCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        NoteGraphCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_dir() {
        let temp = TempDir::new().unwrap();
        let cmd = NoteGraphCommand::new().dir(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_output_success() {
        let output = NoteGraphCommand::new().args(["--help"]).output_success();
        assert!(output.contains("notegraph") || output.contains("notes"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = NoteGraphCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
