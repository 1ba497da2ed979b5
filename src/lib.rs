//! repowiz - interactive multi-repository push
//!
//! repowiz finds the Git repositories in a workspace and walks the user
//! through pushing them: choose repositories, confirm (optionally with
//! force), push. The walkthrough is a reusable wizard engine; push is the
//! command built on it.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs wizards)
//! - [`wizard`] - Step sequencing engine for interactive commands
//! - [`push`] - The push command binding
//! - [`workspace`] - Repository discovery and the backend commands use
//! - [`git`] - Single interface for all Git operations
//! - [`core`] - Domain types and configuration
//! - [`ui`] - Prompts and output
//!
//! # Wizard Guarantees
//!
//! 1. A command executes at most once per run, and only after every step is answered
//! 2. Invalid or dismissed answers end or rewind the run, they never error
//! 3. Steps answered on the command line are not asked again

pub mod cli;
pub mod core;
pub mod git;
pub mod push;
pub mod ui;
pub mod wizard;
pub mod workspace;
