//! workspace
//!
//! The set of repositories a command can operate on.
//!
//! # Modules
//!
//! - `traits`: [`Repository`], [`RepoStatus`] and the [`RepositoryBackend`] trait
//! - `discovery`: Finding repositories under a workspace root
//! - `git_backend`: [`GitBackend`] over real working trees
//! - [`mock`]: In-memory backend for deterministic testing
//!
//! Commands never open repositories themselves; they go through a
//! [`RepositoryBackend`] so they can be exercised against [`mock::MockBackend`].

mod discovery;
mod git_backend;
pub mod mock;
mod traits;

pub use discovery::Discovery;
pub use git_backend::GitBackend;
pub use traits::*;
