//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// repowiz - push many repositories through one interactive wizard
#[derive(Parser, Debug)]
#[command(name = "repowiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if repowiz was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns false when `--no-interactive` or `--quiet` was set, or when
    /// stdin is not a terminal.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet) && std::io::stdin().is_terminal()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Push repositories in the workspace
    Push {
        /// Repositories to push, by name or path (skips selection)
        repos: Vec<String>,

        /// Offer Force Push (--force-with-lease) as the default choice
        #[arg(long, short, conflicts_with = "yes")]
        force: bool,

        /// Skip the confirmation step
        #[arg(long, short, conflicts_with = "confirm")]
        yes: bool,

        /// Always show the confirmation step
        #[arg(long)]
        confirm: bool,
    },

    /// List repositories in the workspace with their upstream status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Confirmation override from `--yes` / `--confirm`.
    pub fn confirm_override(&self) -> Option<bool> {
        match self {
            Command::Push { yes: true, .. } => Some(false),
            Command::Push { confirm: true, .. } => Some(true),
            _ => None,
        }
    }
}
