//! workspace::traits
//!
//! Repository types and the backend trait commands read them through.
//!
//! # Design
//!
//! The backend is async because pushing involves network I/O. Listing and
//! status reads are local but share the same trait so that the push command
//! can be tested entirely against [`super::mock::MockBackend`].

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::types::{RepoId, Tracking, TypeError};
use crate::git::GitError;
use crate::wizard::{Candidate, PendingChanges};

/// Errors from repository backends.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A git operation failed for one repository.
    #[error("{name}: {source}")]
    Git {
        /// Repository name
        name: String,
        /// Underlying failure
        #[source]
        source: GitError,
    },

    /// Filesystem access failed during discovery.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path could not be turned into a repository id.
    #[error(transparent)]
    InvalidRepository(#[from] TypeError),

    /// A requested repository is not in the workspace.
    #[error("unknown repository: {0}")]
    UnknownRepository(String),

    /// The repository is not on a branch, so there is nothing to push.
    #[error("{name}: HEAD is not on a branch")]
    Detached { name: String },

    /// A branch without upstream and a repository without remotes.
    #[error("{name}: no remote to publish to")]
    NoRemote { name: String },

    /// One or more pushes failed.
    #[error("{}", describe_failures(.failures))]
    PushFailed {
        /// `(repository name, reason)` for each failure, in push order
        failures: Vec<(String, String)>,
    },
}

fn describe_failures(failures: &[(String, String)]) -> String {
    let noun = if failures.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    let details = failures
        .iter()
        .map(|(name, reason)| format!("{name} ({reason})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("failed to push {} {}: {}", failures.len(), noun, details)
}

/// A Git working tree in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Identity (canonical working directory)
    pub id: RepoId,
    /// Display name (directory name)
    pub name: String,
    /// Working directory
    pub path: PathBuf,
}

impl Repository {
    /// Create a repository record for `path`.
    ///
    /// The id is derived from `path` as given; callers that discover
    /// repositories on disk canonicalize first.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, TypeError> {
        let path = path.into();
        Ok(Self {
            id: RepoId::from_path(&path)?,
            name: name.into(),
            path,
        })
    }

    /// Create a record named after the last component of `path`.
    pub fn at(path: &Path) -> Result<Self, TypeError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(name, path)
    }
}

impl Candidate for Repository {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How a repository's current branch compares with its upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Branch and upstream compared
    pub tracking: Tracking,
    /// Local commits not yet pushed
    pub ahead: usize,
    /// Upstream commits not yet pulled
    pub behind: usize,
}

impl PendingChanges for RepoStatus {
    fn pending(&self) -> usize {
        self.ahead
    }
}

/// Source of repositories and the operations commands perform on them.
#[async_trait]
pub trait RepositoryBackend: Send + Sync {
    /// Every repository in the workspace, sorted by name.
    async fn list(&self) -> Result<Vec<Repository>, BackendError>;

    /// Upstream status of the repository's current branch.
    ///
    /// `None` when HEAD is detached, unborn, or has no upstream.
    async fn status(&self, repo: &Repository) -> Result<Option<RepoStatus>, BackendError>;

    /// Push the repository's current branch.
    ///
    /// A branch without upstream is published to the backend's remote.
    async fn push(&self, repo: &Repository, force: bool) -> Result<(), BackendError>;
}

/// Resolve user-supplied repository names against `repos`.
///
/// A name matches a repository's display name or its id. The result keeps
/// the order of `names` and drops repeats.
///
/// # Errors
///
/// [`BackendError::UnknownRepository`] for the first name that matches
/// nothing.
pub fn select_by_name(
    repos: &[Repository],
    names: &[String],
) -> Result<Vec<Repository>, BackendError> {
    let mut selected: Vec<Repository> = Vec::with_capacity(names.len());

    for name in names {
        let repo = repos
            .iter()
            .find(|r| r.name == *name || r.id.as_str() == name)
            .ok_or_else(|| BackendError::UnknownRepository(name.clone()))?;

        if !selected.iter().any(|s| s.id == repo.id) {
            selected.push(repo.clone());
        }
    }

    Ok(selected)
}
