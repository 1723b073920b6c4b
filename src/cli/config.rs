//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::detect_repository_root;
use crate::settings::Settings;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "NOTEGRAPH_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Maximum number of notes indexed
    pub scan_limit: Option<usize>,

    /// Lines read when looking for frontmatter
    pub frontmatter_lines: Option<usize>,

    /// Lines scanned per note for links
    pub link_line_cap: Option<usize>,

    /// Milliseconds a built graph is reused
    pub graph_ttl_ms: Option<u64>,

    /// Default graph depth
    pub max_depth: Option<usize>,

    /// Navigation history size
    pub history_limit: Option<usize>,

    /// Milliseconds after back/forward during which opens are not recorded
    pub settle_ms: Option<u64>,

    /// Write frontmatter into new notes
    pub new_note_frontmatter: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$NOTEGRAPH_CONFIG` if set, else `~/.config/notegraph/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notegraph")
            .join("config.toml")
    }

    /// Resolve the notes root, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Git repository containing the current directory
    /// 4. Current working directory
    ///
    /// The result is absolute.
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        let dir = cli_dir.cloned().or_else(|| self.dir.clone()).unwrap_or_else(|| {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            detect_repository_root(&cwd)
        });
        std::path::absolute(&dir).unwrap_or(dir)
    }

    /// Limits for the session, with unset values at their defaults.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            scan_limit: self.scan_limit.unwrap_or(defaults.scan_limit),
            frontmatter_lines: self.frontmatter_lines.unwrap_or(defaults.frontmatter_lines),
            link_line_cap: self.link_line_cap.unwrap_or(defaults.link_line_cap),
            graph_ttl: self
                .graph_ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.graph_ttl),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            history_limit: self.history_limit.unwrap_or(defaults.history_limit),
            settle: self
                .settle_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle),
            new_note_frontmatter: self
                .new_note_frontmatter
                .unwrap_or(defaults.new_note_frontmatter),
        }
    }
}
