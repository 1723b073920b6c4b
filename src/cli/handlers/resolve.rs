//! Resolve and New command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_session;
use crate::cli::output::{Output, OutputFormat, Resolution};
use crate::cli::{NewArgs, ResolveArgs};
use crate::nav::NoteCreation;
use crate::settings::Settings;

pub fn handle_resolve(args: &ResolveArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut session = open_session(root, settings.clone(), args.from.as_deref());
    let path = session
        .resolve_link(&args.token)
        .with_context(|| format!("no note found for '{}'", args.token))?;

    match args.format {
        OutputFormat::Human | OutputFormat::Paths => println!("{}", path.display()),
        OutputFormat::Json => {
            let output = Output::new(Resolution {
                token: args.token.clone(),
                path: path.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

pub fn handle_new(args: &NewArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut settings = settings.clone();
    settings.new_note_frontmatter |= args.frontmatter;
    let mut session = open_session(root, settings, args.from.as_deref());

    match session.create_note(&args.token, args.title.as_deref())? {
        NoteCreation::Created(path) => println!("Created: {}", path.display()),
        NoteCreation::Existing(path) => println!("Exists: {}", path.display()),
    }
    Ok(())
}
