//! A long-lived note graph session bound to one notes root.
//!
//! The session owns the index store and the navigator and is the only thing a
//! host talks to: user actions come in as method calls, host activity as
//! [`Session::on_document_opened`] and [`Session::on_file_event`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::domain::{Direction, LinkGraph, NavigationHistory, Note};
use crate::graph::GraphBuilder;
use crate::index::{FileEvent, IndexStore, link_at};
use crate::infra::{Editor, FileSystem, FsError, Severity, is_markdown, stem_of};
use crate::nav::{NavError, Navigator, NoteCreation, Resolver, Step};
use crate::settings::Settings;

pub struct Session<F: FileSystem, E: Editor> {
    fs: F,
    editor: E,
    root: PathBuf,
    settings: Settings,
    store: IndexStore,
    navigator: Navigator,
}

impl<F: FileSystem, E: Editor> Session<F, E> {
    pub fn new(fs: F, editor: E, root: PathBuf, settings: Settings) -> Self {
        let store = IndexStore::new(settings.graph_ttl);
        let navigator = Navigator::new(settings.history_limit, settings.settle);
        Self {
            fs,
            editor,
            root,
            settings,
            store,
            navigator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn history(&self) -> &NavigationHistory {
        self.navigator.history()
    }

    // ===========================================
    // Resolution
    // ===========================================

    /// Resolves `token` relative to the active document.
    pub fn resolve_link(&mut self, token: &str) -> Option<PathBuf> {
        let active = self.editor.active_document();
        Resolver::new(&self.fs, &self.root, &self.settings).resolve(
            &mut self.store,
            token,
            active.as_deref(),
        )
    }

    /// Creates the note `token` unless it already resolves.
    pub fn create_note(
        &mut self,
        token: &str,
        title: Option<&str>,
    ) -> Result<NoteCreation, NavError> {
        let active = self.editor.active_document();
        let result = Resolver::new(&self.fs, &self.root, &self.settings).create_if_missing(
            &mut self.store,
            token,
            title,
            active.as_deref(),
        );
        match &result {
            Ok(NoteCreation::Created(path)) => {
                let message = format!("Created {}", path.display());
                self.editor.notify(&message, Severity::Info);
            }
            Ok(NoteCreation::Existing(_)) => {}
            Err(err) => self.report(err),
        }
        result
    }

    /// Opens the note `token` refers to, creating it first if needed.
    pub fn follow_link(&mut self, token: &str) -> Result<PathBuf, NavError> {
        let path = match self.resolve_link(token) {
            Some(path) => path,
            None => self.create_note(token, None)?.into_path(),
        };
        self.navigate_to(&path);
        Ok(path)
    }

    /// Follows the link under byte `column` of `line`.
    ///
    /// Returns `Ok(None)` (after an info notification) if there is no link
    /// there.
    pub fn follow_link_at(&mut self, line: &str, column: usize) -> Result<Option<PathBuf>, NavError> {
        match link_at(line, column) {
            Some(span) => self.follow_link(&span.target).map(Some),
            None => {
                self.editor.notify("No link under cursor", Severity::Info);
                Ok(None)
            }
        }
    }

    // ===========================================
    // Navigation
    // ===========================================

    /// Opens `path` and records it as a visit.
    pub fn navigate_to(&mut self, path: &Path) {
        self.editor.open_document(path);
        self.navigator.end_replay();
        self.navigator.navigate(path.to_path_buf(), Instant::now());
    }

    pub fn history_back(&mut self) -> Result<Step, NavError> {
        self.history_step(Direction::Back)
    }

    pub fn history_forward(&mut self) -> Result<Step, NavError> {
        self.history_step(Direction::Forward)
    }

    fn history_step(&mut self, direction: Direction) -> Result<Step, NavError> {
        let result = self.navigator.step(&self.fs, direction, Instant::now());
        match &result {
            Ok(Step::Moved(path)) => self.editor.open_document(path),
            Ok(Step::AtEdge) => {
                let message = match direction {
                    Direction::Back => "Already at the oldest note",
                    Direction::Forward => "Already at the newest note",
                };
                self.editor.notify(message, Severity::Info);
            }
            Err(err) => self.report(err),
        }
        result
    }

    // ===========================================
    // Graph
    // ===========================================

    /// Builds the link graph around `current_name`, or around the active
    /// document when no name is given.
    pub fn build_graph(&mut self, current_name: Option<&str>) -> Result<LinkGraph, NavError> {
        let start = self.graph_start(current_name);
        let (name, path) = match start {
            Ok(start) => start,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };
        let graph = GraphBuilder::new(&self.fs, &self.root, &self.settings).build(
            &mut self.store,
            &name,
            &path,
            self.settings.max_depth,
            Instant::now(),
        );
        Ok(graph)
    }

    fn graph_start(&mut self, current_name: Option<&str>) -> Result<(String, PathBuf), NavError> {
        let active = self.editor.active_document();
        match current_name {
            Some(name) => {
                if let Some(active) = active.filter(|a| stem_of(a) == Some(name)) {
                    return Ok((name.to_string(), active));
                }
                let path = self.resolve_link(name).ok_or_else(|| NavError::NotFound {
                    token: name.to_string(),
                })?;
                Ok((name.to_string(), path))
            }
            None => {
                let active = active.ok_or(NavError::NoActiveDocument)?;
                let name = stem_of(&active).unwrap_or_default().to_string();
                Ok((name, active))
            }
        }
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Link tokens of `path`, served from the link cache when unchanged.
    pub fn links_of(&mut self, path: &Path) -> Vec<String> {
        self.store
            .links
            .extract(&self.fs, path, self.settings.link_line_cap)
    }

    /// Every indexed note, in discovery order.
    pub fn notes(&mut self) -> &[PathBuf] {
        Resolver::new(&self.fs, &self.root, &self.settings).ensure_index(&mut self.store);
        self.store.files.paths()
    }

    /// Scans every note's frontmatter and returns all aliases, sorted.
    pub fn aliases(&mut self) -> Vec<(String, PathBuf)> {
        Resolver::new(&self.fs, &self.root, &self.settings).ensure_index(&mut self.store);
        for path in self.store.files.paths().to_vec() {
            self.store
                .aliases
                .ensure_scanned(&self.fs, &path, self.settings.frontmatter_lines);
        }
        self.store
            .aliases
            .entries()
            .into_iter()
            .map(|(alias, path)| (alias.to_string(), path.to_path_buf()))
            .collect()
    }

    pub fn note(&self, path: &Path) -> Result<Note, FsError> {
        Note::load(&self.fs, path, self.settings.frontmatter_lines)
    }

    // ===========================================
    // Host events
    // ===========================================

    /// Records a document opened by the host.
    ///
    /// Ignored for non-Markdown files and for the open caused by a
    /// back/forward step.
    pub fn on_document_opened(&mut self, path: &Path) -> bool {
        if !is_markdown(path) {
            return false;
        }
        self.navigator.navigate(path.to_path_buf(), Instant::now())
    }

    pub fn on_file_event(&mut self, path: &Path, event: FileEvent) -> bool {
        self.store.on_file_event(path, event)
    }

    /// Drops every index and cache; they are rebuilt on demand.
    pub fn invalidate_all_caches(&mut self) {
        self.store.invalidate_all();
    }

    fn report(&mut self, err: &NavError) {
        let severity = match err {
            NavError::NotFound { .. } | NavError::InvalidToken { .. } | NavError::NoActiveDocument => {
                Severity::Warn
            }
            NavError::Write { .. } | NavError::StaleTarget { .. } => Severity::Error,
        };
        debug!(error = %err, "navigation failed");
        self.editor.notify(&err.to_string(), severity);
    }
}
