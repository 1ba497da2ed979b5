//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the workspace root
//! 2. Builds a backend and, for wizard commands, a binding
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Backends are async because pushing involves network I/O. Handlers stay
//! synchronous and drive their async body on a fresh tokio runtime.

mod list;
mod push;

pub use list::list;
pub use push::push;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let confirm = command.confirm_override();
    match command {
        Command::Push { repos, force, .. } => push::push(ctx, &repos, force, confirm),
        Command::List { json } => list::list(ctx, json),
    }
}

/// Load configuration for the context's workspace root.
fn load_config(ctx: &Context) -> Result<(std::path::PathBuf, Config)> {
    let root = ctx.workspace_root()?;
    let loaded = Config::load(Some(root.as_path()))
        .with_context(|| format!("failed to load configuration for {}", root.display()))?;
    Ok((root, loaded.config))
}
