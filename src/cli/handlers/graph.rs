//! Graph command handler.

use anyhow::Result;
use std::path::Path;

use super::open_session;
use crate::cli::GraphArgs;
use crate::cli::output::GraphFormat;
use crate::graph::render::{render_dot, render_json, render_tree};
use crate::settings::Settings;

pub fn handle_graph(args: &GraphArgs, root: &Path, settings: &Settings) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(depth) = args.depth {
        settings.max_depth = depth;
    }
    let mut session = open_session(root, settings, args.from.as_deref());
    let graph = session.build_graph(args.note.as_deref())?;

    match args.format {
        GraphFormat::Tree => print!("{}", render_tree(&graph)),
        GraphFormat::Dot => print!("{}", render_dot(&graph)),
        GraphFormat::Json => println!("{}", render_json(&graph)?),
    }
    Ok(())
}
