//! Session command handler: one long-lived session driven by line commands.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{display_path, locate_note, note_file};
use crate::cli::SessionArgs;
use crate::cli::terminal::TerminalEditor;
use crate::graph::render::render_tree;
use crate::index::FileEvent;
use crate::infra::{Editor, FileSystem, RealFs, Severity};
use crate::nav::{NavError, Step};
use crate::session::Session;
use crate::settings::Settings;

const HELP: &str = "\
commands:
  open <file|note>     open a file, or follow a link target
  follow <note>        follow a link target, creating the note if needed
  at <line> <column>   follow the link at a position in the active note
  back | forward       step through history
  history              list visited notes
  graph [note]         link graph of a note (default: active)
  links                links of the active note
  where                print the active note
  created|saved|deleted <file>
                       report a file change
  reindex              drop every cache
  quit
";

/// A line command read by `notegraph session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Open(String),
    Follow(String),
    /// Follow the link at a 1-based line and column of the active note.
    At { line: usize, column: usize },
    Back,
    Forward,
    History,
    Graph(Option<String>),
    Links,
    Where,
    Event(FileEvent, PathBuf),
    Reindex,
    Help,
    Quit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));
        let required = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {command} {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match command {
            "open" | "o" => required("<file|note>").map(ReplCommand::Open),
            "follow" | "f" => required("<note>").map(ReplCommand::Follow),
            "at" => {
                let mut numbers = rest.split_whitespace().map(str::parse::<usize>);
                match (numbers.next(), numbers.next(), numbers.next()) {
                    (Some(Ok(line)), Some(Ok(column)), None) if line > 0 && column > 0 => {
                        Ok(ReplCommand::At { line, column })
                    }
                    _ => Err(format!("usage: {command} <line> <column>")),
                }
            }
            "back" | "b" => Ok(ReplCommand::Back),
            "forward" | "fwd" => Ok(ReplCommand::Forward),
            "history" | "h" => Ok(ReplCommand::History),
            "graph" | "g" => Ok(ReplCommand::Graph(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "links" | "l" => Ok(ReplCommand::Links),
            "where" | "pwd" => Ok(ReplCommand::Where),
            "created" | "saved" | "deleted" => {
                let event = match command {
                    "created" => FileEvent::Created,
                    "saved" => FileEvent::Saved,
                    _ => FileEvent::Deleted,
                };
                required("<file>").map(|p| ReplCommand::Event(event, PathBuf::from(p)))
            }
            "reindex" => Ok(ReplCommand::Reindex),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

pub fn handle_session(args: &SessionArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = Session::new(
        RealFs,
        TerminalEditor::new(None).echo(true),
        root.to_path_buf(),
        settings.clone(),
    );
    if let Some(from) = &args.from {
        let path = locate_note(&mut session, &from.to_string_lossy())?;
        session.navigate_to(&path);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_repl(&mut session, stdin.lock(), &mut stdout)
}

/// Executes commands from `input` until it ends or `quit` is read.
///
/// Results go to `out`; failures are reported through the session's editor.
pub fn run_repl<F, E, R, W>(session: &mut Session<F, E>, input: R, out: &mut W) -> Result<()>
where
    F: FileSystem,
    E: Editor,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match trimmed.parse::<ReplCommand>() {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => execute(session, command, out)?,
            Err(message) => session.editor_mut().notify(&message, Severity::Warn),
        }
        out.flush()?;
    }
    Ok(())
}

fn execute<F: FileSystem, E: Editor, W: Write>(
    session: &mut Session<F, E>,
    command: ReplCommand,
    out: &mut W,
) -> io::Result<()> {
    let root = session.root().to_path_buf();
    match command {
        ReplCommand::Open(note) => {
            let opened = match note_file(session, &note) {
                Some(path) => {
                    session.navigate_to(&path);
                    Some(path)
                }
                None => session.follow_link(&note).ok(),
            };
            if let Some(path) = opened {
                writeln!(out, "{}", display_path(&root, &path))?;
            }
        }
        ReplCommand::Follow(token) => {
            if let Ok(path) = session.follow_link(&token) {
                writeln!(out, "{}", display_path(&root, &path))?;
            }
        }
        ReplCommand::At { line, column } => match session.editor().active_document() {
            Some(active) => {
                let text = session
                    .fs()
                    .read_lines(&active, line)
                    .ok()
                    .and_then(|lines| lines.into_iter().nth(line - 1))
                    .unwrap_or_default();
                if let Ok(Some(path)) = session.follow_link_at(&text, column - 1) {
                    writeln!(out, "{}", display_path(&root, &path))?;
                }
            }
            None => session
                .editor_mut()
                .notify("No active document", Severity::Warn),
        },
        ReplCommand::Back => print_step(session.history_back(), &root, out)?,
        ReplCommand::Forward => print_step(session.history_forward(), &root, out)?,
        ReplCommand::History => {
            let history = session.history();
            for (i, entry) in history.entries().iter().enumerate() {
                let marker = if history.index() == Some(i) { ">" } else { " " };
                writeln!(out, "{marker} {}", display_path(&root, entry))?;
            }
        }
        ReplCommand::Graph(name) => {
            if let Ok(graph) = session.build_graph(name.as_deref()) {
                write!(out, "{}", render_tree(&graph))?;
            }
        }
        ReplCommand::Links => match session.editor().active_document() {
            Some(active) => {
                for link in session.links_of(&active) {
                    writeln!(out, "{link}")?;
                }
            }
            None => session
                .editor_mut()
                .notify("No active document", Severity::Warn),
        },
        ReplCommand::Where => match session.editor().active_document() {
            Some(active) => writeln!(out, "{}", display_path(&root, &active))?,
            None => writeln!(out, "(none)")?,
        },
        ReplCommand::Event(event, path) => {
            let path = if path.is_absolute() {
                path
            } else {
                root.join(path)
            };
            session.on_file_event(&path, event);
        }
        ReplCommand::Reindex => {
            session.invalidate_all_caches();
            writeln!(out, "Caches cleared")?;
        }
        ReplCommand::Help => write!(out, "{HELP}")?,
        ReplCommand::Quit => {}
    }
    Ok(())
}

fn print_step<W: Write>(step: Result<Step, NavError>, root: &Path, out: &mut W) -> io::Result<()> {
    if let Ok(Step::Moved(path)) = step {
        writeln!(out, "{}", display_path(root, &path))?;
    }
    Ok(())
}
