//! Links and Show command handlers.

use anyhow::Result;
use std::path::Path;

use super::{display_path, locate_note, open_session};
use crate::cli::output::{LinkListing, NoteDetails, Output, OutputFormat};
use crate::cli::terminal::TerminalEditor;
use crate::cli::{LinksArgs, ShowArgs};
use crate::infra::{Editor, RealFs};
use crate::session::Session;
use crate::settings::Settings;

/// Resolves every link of `path` relative to it.
fn resolve_links(session: &mut Session<RealFs, TerminalEditor>, path: &Path) -> Vec<LinkListing> {
    session.editor_mut().open_document(path);
    session
        .links_of(path)
        .into_iter()
        .map(|target| {
            let resolved = session.resolve_link(&target);
            LinkListing {
                target,
                path: resolved.map(|p| p.display().to_string()),
            }
        })
        .collect()
}

pub fn handle_links(args: &LinksArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = open_session(root, settings.clone(), None);
    let path = locate_note(&mut session, &args.note)?;
    let links = resolve_links(&mut session, &path);

    match args.format {
        OutputFormat::Human => {
            if links.is_empty() {
                println!("No links found.");
            }
            for link in &links {
                let target = match &link.path {
                    Some(p) => display_path(root, Path::new(p)),
                    None => "(missing)".to_string(),
                };
                println!("{:<30}  {}", link.target, target);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(links))?);
        }
        OutputFormat::Paths => {
            for path in links.iter().filter_map(|l| l.path.as_deref()) {
                println!("{path}");
            }
        }
    }
    Ok(())
}

pub fn handle_show(args: &ShowArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = open_session(root, settings.clone(), None);
    let path = locate_note(&mut session, &args.note)?;
    let note = session.note(&path)?;
    let links = resolve_links(&mut session, &path);

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.display_title());
            println!();
            println!(
                "Path: {}  Modified: {}",
                display_path(root, note.path()),
                note.modified().format("%Y-%m-%d")
            );
            if let Some(created) = note.created() {
                println!("Created: {created}");
            }
            if !note.aliases().is_empty() {
                println!("Aliases: {}", note.aliases().join(", "));
            }
            if !note.tags().is_empty() {
                println!("Tags: {}", note.tags().join(", "));
            }
            if !links.is_empty() {
                println!();
                println!("Links:");
                for link in &links {
                    match &link.path {
                        Some(p) => println!("  {} -> {}", link.target, display_path(root, Path::new(p))),
                        None => println!("  {} (missing)", link.target),
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output = Output::new(NoteDetails { note, links });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => println!("{}", path.display()),
    }
    Ok(())
}
