//! git::interface
//!
//! Read-side Git interface implemented with git2.
//!
//! All repository reads flow through [`Git`]: opening a working tree,
//! resolving the current branch and its upstream, and counting how far the
//! branch has diverged from that upstream. Pushing lives in
//! [`super::push`] because it shells out to the `git` binary.
//!
//! # Example
//!
//! ```ignore
//! use repowiz::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! if let Some(divergence) = git.divergence()? {
//!     println!("{} ahead of {}", divergence.ahead, divergence.tracking.upstream);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Tracking;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a Git working tree.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported: {path}")]
    BareRepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// `git push` exited unsuccessfully.
    #[error("push failed in {path}: {message}")]
    PushFailed {
        /// Working directory of the repository
        path: PathBuf,
        /// First line of git's stderr
        message: String,
    },

    /// The git binary could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// How far a branch has diverged from its upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Branch and upstream being compared
    pub tracking: Tracking,
    /// Commits on the local branch missing upstream
    pub ahead: usize,
    /// Commits upstream missing locally
    pub behind: usize,
}

/// A Git working tree.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Working directory
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Git {
    /// Open the working tree rooted exactly at `path`.
    ///
    /// Unlike discovery, this does not walk up to a parent repository, so a
    /// plain directory inside some other checkout is reported as
    /// [`GitError::NotARepo`].
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path` is not a repository root
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo
            .workdir()
            .ok_or_else(|| GitError::BareRepo {
                path: path.to_path_buf(),
            })?
            .to_path_buf();

        Ok(Self { repo, work_dir })
    }

    /// Working directory of the repository.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Get the current branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            return Ok(head.shorthand().map(String::from));
        }

        Ok(None)
    }

    /// Get the upstream of the current branch.
    ///
    /// Returns `None` when HEAD is not on a branch or the branch has no
    /// configured upstream.
    pub fn tracking(&self) -> Result<Option<Tracking>, GitError> {
        let Some(branch_name) = self.current_branch()? else {
            return Ok(None);
        };

        let branch = self
            .repo
            .find_branch(&branch_name, git2::BranchType::Local)?;
        let upstream = match branch.upstream() {
            Ok(u) => u,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let upstream_name = upstream.name()?.map(String::from).ok_or_else(|| {
            GitError::Internal {
                message: format!("upstream of '{}' is not valid UTF-8", branch_name),
            }
        })?;

        Ok(Some(Tracking {
            branch: branch_name,
            upstream: upstream_name,
        }))
    }

    /// Count commits ahead of and behind the upstream of the current branch.
    ///
    /// Returns `None` when there is no upstream to compare against.
    pub fn divergence(&self) -> Result<Option<Divergence>, GitError> {
        let Some(tracking) = self.tracking()? else {
            return Ok(None);
        };

        let local = self
            .repo
            .refname_to_id(&format!("refs/heads/{}", tracking.branch))?;
        let remote = self
            .repo
            .refname_to_id(&format!("refs/remotes/{}", tracking.upstream))?;

        let (ahead, behind) = self.repo.graph_ahead_behind(local, remote)?;

        Ok(Some(Divergence {
            tracking,
            ahead,
            behind,
        }))
    }

    /// Get the default remote name.
    ///
    /// Prefers "origin", otherwise returns the first remote found, or `None`
    /// if no remotes exist.
    pub fn default_remote(&self) -> Result<Option<String>, GitError> {
        let remotes = self.repo.remotes()?;

        if remotes.iter().flatten().any(|name| name == "origin") {
            return Ok(Some("origin".to_string()));
        }

        Ok(remotes.iter().flatten().next().map(String::from))
    }
}
