//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, help text
//! and defaults. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name = "plater",
    bin_name = "plater",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Generate and maintain project boilerplate",
    long_about = "Plater inspects a repository, enriches its .plater.yaml \
                  configuration and regenerates the project's boilerplate \
                  files from builtin templates.",
    after_help = "EXAMPLES:\n\
        \x20 plater generate\n\
        \x20 plater generate --destdir ../service --force\n\
        \x20 plater validate",
    arg_required_else_help = true,
    subcommand_required = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the parser pipeline and regenerate boilerplate files.
    #[command(
        visible_alias = "gen",
        about = "Generate boilerplate files",
        after_help = "EXAMPLES:\n\
            \x20 plater generate\n\
            \x20 plater generate --force  # regenerate even once-only files"
    )]
    Generate(GenerateArgs),

    /// Validate the configuration file against the embedded schema.
    #[command(about = "Validate .plater.yaml")]
    Validate(ValidateArgs),
}

/// Arguments for `plater generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Destination repository.
    #[arg(long = "destdir", value_name = "DIR", default_value = ".")]
    pub destdir: PathBuf,

    /// Regenerate files that are normally only generated once.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

/// Arguments for `plater validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Destination repository.
    #[arg(long = "destdir", value_name = "DIR", default_value = ".")]
    pub destdir: PathBuf,
}
