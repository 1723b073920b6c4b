//! List and Aliases command handlers.

use anyhow::Result;
use std::path::Path;

use super::{display_path, open_session, truncate_str};
use crate::cli::output::{AliasListing, NoteListing, Output, OutputFormat};
use crate::cli::{AliasesArgs, ListArgs};
use crate::domain::Note;
use crate::settings::Settings;

pub fn handle_list(args: &ListArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = open_session(root, settings.clone(), None);
    let paths = session.notes().to_vec();
    // Files removed since indexing are skipped.
    let notes: Vec<Note> = paths
        .iter()
        .filter_map(|path| session.note(path).ok())
        .collect();

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<30}  {:<40}  {:>10}", "Name", "Title", "Modified");
                println!(
                    "{:<30}  {:<40}  {:>10}",
                    "------------------------------",
                    "----------------------------------------",
                    "----------"
                );

                for note in &notes {
                    let name = truncate_str(&display_path(root, note.path()), 30);
                    let title = truncate_str(note.display_title(), 40);
                    let modified = note.modified().format("%Y-%m-%d").to_string();
                    println!("{:<30}  {:<40}  {:>10}", name, title, modified);
                }

                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes
                .iter()
                .map(|n| NoteListing {
                    name: n.stem().to_string(),
                    title: n.display_title().to_string(),
                    path: n.path().display().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Paths => {
            for note in &notes {
                println!("{}", note.path().display());
            }
        }
    }

    Ok(())
}

pub fn handle_aliases(args: &AliasesArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = open_session(root, settings.clone(), None);
    let aliases = session.aliases();

    match args.format {
        OutputFormat::Human => {
            if aliases.is_empty() {
                println!("No aliases found.");
            }
            for (alias, path) in &aliases {
                println!("{:<30}  {}", alias, display_path(root, path));
            }
        }
        OutputFormat::Json => {
            let listings: Vec<AliasListing> = aliases
                .into_iter()
                .map(|(alias, path)| AliasListing {
                    alias,
                    path: path.display().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Paths => {
            for (_, path) in &aliases {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
