use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "KinoData Developers",
    version,
    about = "KinoData CLI - Load KINOMEscan percentage-displacement datasets into cross-referenced domain objects and inspect what materialized.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a dataset and report the materialized proteins, ligands, and measurements.
    Summary(SummaryArgs),
    /// Generate the Markdown API docs tree and print its YAML table of contents.
    DocsTree(DocsTreeArgs),
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Path to the provider configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Materialize the full cross product up front instead of lazily.
    #[arg(long)]
    pub eager: bool,
}

/// Arguments for the `docs-tree` subcommand.
#[derive(Args, Debug)]
pub struct DocsTreeArgs {
    /// Root of the Rust source tree to document (e.g. crates/kinodata-core/src).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub source: PathBuf,

    /// Directory to create the Markdown stubs in. Must not exist yet.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Package name used as the root of every module path.
    #[arg(short, long, default_value = "kinodata", value_name = "NAME")]
    pub package: String,
}
