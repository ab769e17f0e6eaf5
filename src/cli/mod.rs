//! CLI argument parsing for nsprep.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nsprep: render a branch-specific config file from a template.
///
/// The current git branch selects a namespace binding (`prod`, `staging`, or
/// the `dev` default) whose fields fill the `{placeholders}` of the template.
/// Running without a subcommand is the same as `nsprep render`.
#[derive(Parser, Debug)]
#[command(name = "nsprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if nsprep was started in DIR.
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file (default: nsprep.yaml at the project root, if present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for nsprep.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the template for the current branch.
    ///
    /// Writes the output file with a "do not edit" header, replacing any
    /// previous version. Nothing is written if a placeholder cannot be filled.
    Render(RenderArgs),

    /// Show the branch and binding a render would use.
    ///
    /// Also lists template fields the binding does not define. Writes nothing.
    Resolve(ResolveArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug, Default)]
pub struct RenderArgs {
    /// Template path relative to the project root.
    #[arg(long, value_name = "PATH")]
    pub template: Option<String>,

    /// Output path relative to the project root.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Print the rendered document instead of writing the output file.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug, Default)]
pub struct ResolveArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments, leaving error reporting to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}
