//! workspace::git_backend
//!
//! [`RepositoryBackend`] over real working trees.

use std::path::PathBuf;

use async_trait::async_trait;

use super::discovery::Discovery;
use super::traits::{BackendError, RepoStatus, Repository, RepositoryBackend};
use crate::core::config::Config;
use crate::git::{self, Git, PushOptions};

/// Backend reading repositories from disk and pushing with `git`.
#[derive(Debug, Clone)]
pub struct GitBackend {
    root: PathBuf,
    discovery: Discovery,
    remote: Option<String>,
}

impl GitBackend {
    /// Backend for the workspace at `root`, scanning only the root itself.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            discovery: Discovery::default(),
            remote: None,
        }
    }

    /// Backend for the workspace at `root`, configured from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            discovery: Discovery {
                max_depth: config.max_depth(),
                exclude: config.excluded().to_vec(),
                explicit: config.repositories().to_vec(),
            },
            remote: Some(config.push_remote().to_string()),
        }
    }

    /// Remote used to publish branches without an upstream.
    ///
    /// When unset the repository's own default remote is used.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }

    /// Set how deep discovery scans.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.discovery.max_depth = max_depth;
        self
    }

    fn open(&self, repo: &Repository) -> Result<Git, BackendError> {
        Git::open(&repo.path).map_err(|source| git_error(repo, source))
    }

    fn push_options(&self, repo: &Repository, force: bool) -> Result<PushOptions, BackendError> {
        let git = self.open(repo)?;
        if git.tracking().map_err(|e| git_error(repo, e))?.is_some() {
            return Ok(PushOptions {
                force,
                set_upstream: None,
            });
        }

        let branch = git
            .current_branch()
            .map_err(|e| git_error(repo, e))?
            .ok_or_else(|| BackendError::Detached {
                name: repo.name.clone(),
            })?;

        let remote = match &self.remote {
            Some(remote) => remote.clone(),
            None => git
                .default_remote()
                .map_err(|e| git_error(repo, e))?
                .ok_or_else(|| BackendError::NoRemote {
                    name: repo.name.clone(),
                })?,
        };

        Ok(PushOptions {
            force,
            set_upstream: Some((remote, branch)),
        })
    }
}

fn git_error(repo: &Repository, source: git::GitError) -> BackendError {
    BackendError::Git {
        name: repo.name.clone(),
        source,
    }
}

#[async_trait]
impl RepositoryBackend for GitBackend {
    async fn list(&self) -> Result<Vec<Repository>, BackendError> {
        self.discovery.run(&self.root)
    }

    async fn status(&self, repo: &Repository) -> Result<Option<RepoStatus>, BackendError> {
        let divergence = self
            .open(repo)?
            .divergence()
            .map_err(|e| git_error(repo, e))?;

        Ok(divergence.map(|d| RepoStatus {
            tracking: d.tracking,
            ahead: d.ahead,
            behind: d.behind,
        }))
    }

    async fn push(&self, repo: &Repository, force: bool) -> Result<(), BackendError> {
        let options = self.push_options(repo, force)?;
        tracing::info!(repo = %repo.name, force, "pushing");
        git::push(&repo.path, &options)
            .await
            .map_err(|e| git_error(repo, e))
    }
}
