//! git::push
//!
//! Push a working tree's current branch by invoking the `git` binary.
//!
//! Pushing goes through the CLI rather than git2 so that the user's
//! credential helpers, SSH agent and hooks apply exactly as they would for a
//! manual `git push`.

use std::path::Path;

use tokio::process::Command;

use super::GitError;

/// Options for a single push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Overwrite the remote branch (uses `--force-with-lease`).
    pub force: bool,
    /// Publish a branch without an upstream: `(remote, branch)`.
    pub set_upstream: Option<(String, String)>,
}

impl PushOptions {
    /// Arguments passed to `git`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["push".to_string()];
        if self.force {
            args.push("--force-with-lease".to_string());
        }
        if let Some((remote, branch)) = &self.set_upstream {
            args.push("--set-upstream".to_string());
            args.push(remote.clone());
            args.push(branch.clone());
        }
        args
    }
}

/// Run `git push` in `work_dir`.
///
/// # Errors
///
/// - [`GitError::Spawn`] if git cannot be started
/// - [`GitError::PushFailed`] if git exits non-zero
pub async fn push(work_dir: &Path, options: &PushOptions) -> Result<(), GitError> {
    let args = options.args();
    tracing::debug!(path = %work_dir.display(), ?args, "running git push");

    let output = Command::new("git")
        .args(&args)
        .current_dir(work_dir)
        .output()
        .await?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("git push exited unsuccessfully")
        .to_string();

    Err(GitError::PushFailed {
        path: work_dir.to_path_buf(),
        message,
    })
}
