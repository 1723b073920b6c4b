//! notegraph - wiki-link resolution, note creation and link graphs for a
//! directory of markdown notes

pub mod cli;
pub mod domain;
pub mod graph;
pub mod index;
pub mod infra;
pub mod logging;
pub mod nav;
pub mod session;
pub mod settings;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_aliases, handle_graph, handle_links, handle_list, handle_new, handle_resolve,
        handle_session, handle_show,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load()?;
    let root = config.notes_dir(cli.dir.as_ref());
    let settings = config.settings();
    tracing::debug!(root = %root.display(), "notes root");

    match &cli.command {
        Command::Resolve(args) => handle_resolve(args, &root, &settings),
        Command::New(args) => handle_new(args, &root, &settings),
        Command::Links(args) => handle_links(args, &root, &settings),
        Command::Graph(args) => handle_graph(args, &root, &settings),
        Command::List(args) => handle_list(args, &root, &settings),
        Command::Aliases(args) => handle_aliases(args, &root, &settings),
        Command::Show(args) => handle_show(args, &root, &settings),
        Command::Session(args) => handle_session(args, &root, &settings),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "notegraph",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
