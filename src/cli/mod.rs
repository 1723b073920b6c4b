//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;
pub mod terminal;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::{GraphFormat, OutputFormat};

/// notegraph - resolve, create and navigate linked markdown notes
#[derive(Parser, Debug)]
#[command(name = "notegraph", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file and repository root)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a link target to a note file
    Resolve(ResolveArgs),

    /// Create a note unless the name already resolves
    New(NewArgs),

    /// List the links of a note and where they resolve
    Links(LinksArgs),

    /// Show the link graph around a note
    Graph(GraphArgs),

    /// List indexed notes
    #[command(name = "ls")]
    List(ListArgs),

    /// List aliases declared in frontmatter
    Aliases(AliasesArgs),

    /// Show a note's metadata and links
    Show(ShowArgs),

    /// Run an interactive navigation session reading commands from stdin
    Session(SessionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Link target, e.g. `Project Plan`, `plan.md` or `sub/plan`
    pub token: String,

    /// Note the link appears in (prefers notes in its directory)
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note name (file stem)
    pub token: String,

    /// Heading title (defaults to the name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Create next to this note instead of in the notes root
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Write a title/created frontmatter block
    #[arg(long)]
    pub frontmatter: bool,
}

/// Arguments for the `links` command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Note file or name
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Note name to start from (defaults to --from)
    pub note: Option<String>,

    /// Active note; the graph starts here when no name is given
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Maximum traversal depth
    #[arg(long)]
    pub depth: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = GraphFormat::Tree)]
    pub format: GraphFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `aliases` command
#[derive(Parser, Debug)]
pub struct AliasesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note file or name
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `session` command
#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Note to open first
    #[arg(long)]
    pub from: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
