//! workspace::mock
//!
//! In-memory [`RepositoryBackend`] for deterministic testing.
//!
//! # Example
//!
//! ```
//! use repowiz::workspace::mock::MockBackend;
//!
//! let backend = MockBackend::new()
//!     .with_repo("api", Some(2))
//!     .with_repo("web", None)
//!     .failing_push("web");
//! assert_eq!(backend.repositories().len(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{BackendError, RepoStatus, Repository, RepositoryBackend};
use crate::core::types::Tracking;
use crate::git::GitError;

/// Mock repository backend.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendInner>>,
}

#[derive(Debug, Default)]
struct MockBackendInner {
    repos: Vec<Repository>,
    statuses: HashMap<String, RepoStatus>,
    failing_push: HashSet<String>,
    failing_list: bool,
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    List,
    Status { name: String },
    Push { name: String, force: bool },
}

impl MockBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository at `/work/<name>`.
    ///
    /// `ahead` is the number of unpushed commits on `main`, or `None` for a
    /// branch without upstream.
    pub fn with_repo(self, name: &str, ahead: Option<usize>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let repo = Repository::new(name, format!("/work/{name}")).unwrap();
            if let Some(ahead) = ahead {
                inner.statuses.insert(
                    name.to_string(),
                    RepoStatus {
                        tracking: Tracking {
                            branch: "main".to_string(),
                            upstream: "origin/main".to_string(),
                        },
                        ahead,
                        behind: 0,
                    },
                );
            }
            inner.repos.push(repo);
        }
        self
    }

    /// Make pushes of `name` fail.
    pub fn failing_push(self, name: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failing_push
            .insert(name.to_string());
        self
    }

    /// Make `list` fail.
    pub fn failing_list(self) -> Self {
        self.inner.lock().unwrap().failing_list = true;
        self
    }

    /// Repositories the backend will list.
    pub fn repositories(&self) -> Vec<Repository> {
        self.inner.lock().unwrap().repos.clone()
    }

    /// Look up a repository by name.
    pub fn repo(&self, name: &str) -> Option<Repository> {
        self.repositories().into_iter().find(|r| r.name == name)
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Names pushed, with their force flag, in order.
    pub fn pushes(&self) -> Vec<(String, bool)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Push { name, force } => Some((name, force)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: MockOperation) {
        self.inner.lock().unwrap().operations.push(op);
    }
}

#[async_trait]
impl RepositoryBackend for MockBackend {
    async fn list(&self) -> Result<Vec<Repository>, BackendError> {
        self.record(MockOperation::List);
        let inner = self.inner.lock().unwrap();
        if inner.failing_list {
            return Err(BackendError::Io {
                path: "/work".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(inner.repos.clone())
    }

    async fn status(&self, repo: &Repository) -> Result<Option<RepoStatus>, BackendError> {
        self.record(MockOperation::Status {
            name: repo.name.clone(),
        });
        Ok(self.inner.lock().unwrap().statuses.get(&repo.name).cloned())
    }

    async fn push(&self, repo: &Repository, force: bool) -> Result<(), BackendError> {
        self.record(MockOperation::Push {
            name: repo.name.clone(),
            force,
        });
        if self.inner.lock().unwrap().failing_push.contains(&repo.name) {
            return Err(BackendError::Git {
                name: repo.name.clone(),
                source: GitError::PushFailed {
                    path: repo.path.clone(),
                    message: "rejected".to_string(),
                },
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_operations() {
        let backend = MockBackend::new().with_repo("api", Some(1));
        let api = backend.repo("api").unwrap();

        backend.list().await.unwrap();
        backend.status(&api).await.unwrap();
        backend.push(&api, true).await.unwrap();

        assert_eq!(
            backend.operations(),
            vec![
                MockOperation::List,
                MockOperation::Status {
                    name: "api".to_string()
                },
                MockOperation::Push {
                    name: "api".to_string(),
                    force: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn unpublished_repo_has_no_status() {
        let backend = MockBackend::new().with_repo("api", None);
        let api = backend.repo("api").unwrap();
        assert_eq!(backend.status(&api).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_push_still_recorded() {
        let backend = MockBackend::new().with_repo("api", Some(1)).failing_push("api");
        let api = backend.repo("api").unwrap();

        assert!(backend.push(&api, false).await.is_err());
        assert_eq!(backend.pushes(), vec![("api".to_string(), false)]);
    }

    #[tokio::test]
    async fn failing_list() {
        let backend = MockBackend::new().failing_list();
        assert!(matches!(
            backend.list().await,
            Err(BackendError::Io { .. })
        ));
    }
}
