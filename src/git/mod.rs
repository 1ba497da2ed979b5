//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`
//! or spawns the `git` binary.
//!
//! # Responsibilities
//!
//! - Opening working trees
//! - Current branch, upstream and ahead/behind counts
//! - Pushing (via the `git` binary)

mod interface;
mod push;

pub use interface::{Divergence, Git, GitError};
pub use push::{push, PushOptions};
