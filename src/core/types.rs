//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RepoId`] - Stable identity of a repository in the workspace
//! - [`Tracking`] - A local branch and the upstream it tracks
//!
//! # Examples
//!
//! ```
//! use repowiz::core::types::RepoId;
//!
//! let id = RepoId::new("/work/api").unwrap();
//! assert_eq!(id.as_str(), "/work/api");
//!
//! assert!(RepoId::new("").is_err());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid repository id: {0}")]
    InvalidRepoId(String),
}

/// Identity of a repository.
///
/// Two repositories are the same entity exactly when their ids are equal.
/// Ids are derived from the canonical working directory path, so the same
/// checkout reached through different relative paths compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId(String);

impl RepoId {
    /// Create a new validated repository id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRepoId` if the id is empty, has surrounding
    /// whitespace, or contains control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidRepoId("id cannot be empty".into()));
        }
        if id.trim() != id {
            return Err(TypeError::InvalidRepoId(format!(
                "'{id}' has leading or trailing whitespace"
            )));
        }
        if id.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidRepoId(
                "id cannot contain control characters".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Build an id from a working directory path.
    pub fn from_path(path: &Path) -> Result<Self, TypeError> {
        Self::new(path.to_string_lossy().into_owned())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepoId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepoId> for String {
    fn from(id: RepoId) -> Self {
        id.0
    }
}

impl AsRef<str> for RepoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A local branch together with the upstream it tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracking {
    /// Local branch name (e.g. `main`)
    pub branch: String,
    /// Upstream shorthand (e.g. `origin/main`)
    pub upstream: String,
}

impl std::fmt::Display for Tracking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.branch, self.upstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repo_id {
        use super::*;

        #[test]
        fn accepts_absolute_path() {
            let id = RepoId::new("/home/dev/api").unwrap();
            assert_eq!(id.as_str(), "/home/dev/api");
        }

        #[test]
        fn rejects_empty() {
            assert!(RepoId::new("").is_err());
        }

        #[test]
        fn rejects_surrounding_whitespace() {
            assert!(RepoId::new(" /repo").is_err());
            assert!(RepoId::new("/repo\t").is_err());
        }

        #[test]
        fn rejects_control_characters() {
            assert!(RepoId::new("/re\u{7}po").is_err());
        }

        #[test]
        fn from_path_uses_display_form() {
            let id = RepoId::from_path(Path::new("/srv/web")).unwrap();
            assert_eq!(id.to_string(), "/srv/web");
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<RepoId, _> = serde_json::from_str("\"\"");
            assert!(result.is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let id = RepoId::new("/a/b").unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"/a/b\"");
            let parsed: RepoId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, id);
        }
    }

    mod tracking {
        use super::*;

        #[test]
        fn display_names_both_ends() {
            let t = Tracking {
                branch: "main".into(),
                upstream: "origin/main".into(),
            };
            assert_eq!(t.to_string(), "main to origin/main");
        }
    }
}
