//! workspace::discovery
//!
//! Find the repositories that make up a workspace.
//!
//! An explicit list from the workspace file wins. Otherwise the root and
//! its subdirectories are scanned down to `max_depth` levels. Hidden
//! directories, excluded names and the insides of found repositories are
//! not descended into.

use std::path::{Path, PathBuf};

use super::traits::{BackendError, Repository};
use crate::git::Git;

/// Where to look for repositories.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Levels below the root to scan
    pub max_depth: usize,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    /// Explicit repository paths, relative to the root
    pub explicit: Vec<PathBuf>,
}

impl Discovery {
    /// Collect repositories under `root`, sorted by name then path.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Io`] if the root or a scanned directory cannot be read
    /// - [`BackendError::Git`] if an explicit path is not a working tree
    pub fn run(&self, root: &Path) -> Result<Vec<Repository>, BackendError> {
        let mut found = if self.explicit.is_empty() {
            let mut found = Vec::new();
            self.scan(root, 0, &mut found)?;
            found
        } else {
            self.explicit
                .iter()
                .map(|path| explicit_repository(&root.join(path)))
                .collect::<Result<Vec<_>, _>>()?
        };

        found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        found.dedup_by(|a, b| a.id == b.id);

        tracing::debug!(root = %root.display(), count = found.len(), "discovered repositories");
        Ok(found)
    }

    fn scan(
        &self,
        dir: &Path,
        depth: usize,
        found: &mut Vec<Repository>,
    ) -> Result<(), BackendError> {
        if Git::open(dir).is_ok() {
            found.push(repository_at(dir)?);
            return Ok(());
        }
        if depth >= self.max_depth {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|source| BackendError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut children: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| !self.skipped(path))
            .collect();
        children.sort();

        for child in children {
            self.scan(&child, depth + 1, found)?;
        }
        Ok(())
    }

    fn skipped(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return true;
        };
        name.starts_with('.') || self.exclude.iter().any(|e| e == name)
    }
}

fn explicit_repository(path: &Path) -> Result<Repository, BackendError> {
    Git::open(path).map_err(|source| BackendError::Git {
        name: path.display().to_string(),
        source,
    })?;
    repository_at(path)
}

fn repository_at(path: &Path) -> Result<Repository, BackendError> {
    let canonical = path.canonicalize().map_err(|source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Repository::at(&canonical)?)
}
