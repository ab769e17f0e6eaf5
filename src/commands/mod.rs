//! Command implementations for nsprep.
//!
//! The dispatcher resolves the project context and config once, then routes
//! to the command handler. No subcommand means `render` with defaults.

mod render;
mod resolve;

use crate::cli::{Cli, Command, RenderArgs};
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::Result;

/// Dispatch a parsed command line to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = ProjectContext::resolve(cli.dir.as_deref())?;
    let config_path = cli.config.as_deref().map(|p| ctx.cwd_path(p));
    let config = Config::discover(&ctx.root, config_path.as_deref())?;

    match cli.command.unwrap_or_else(|| Command::Render(RenderArgs::default())) {
        Command::Render(args) => render::cmd_render(&ctx, config, args),
        Command::Resolve(args) => resolve::cmd_resolve(&ctx, &config, args),
    }
}
