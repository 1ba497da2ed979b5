//! cli::commands::list
//!
//! Show the repositories the push wizard would offer.

use anyhow::Result;
use serde::Serialize;

use super::load_config;
use crate::cli::Context;
use crate::ui::output::{self, Verbosity};
use crate::workspace::{GitBackend, RepoStatus, Repository, RepositoryBackend};

#[derive(Debug, Serialize)]
struct ListEntry {
    #[serde(flatten)]
    repo: Repository,
    status: Option<RepoStatus>,
}

/// List workspace repositories and their upstream status.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(list_async(ctx, json))
}

async fn list_async(ctx: &Context, json: bool) -> Result<()> {
    let (root, config) = load_config(ctx)?;
    let backend = GitBackend::from_config(&root, &config);

    let mut entries = Vec::new();
    for repo in backend.list().await? {
        let status = backend.status(&repo).await?;
        entries.push(ListEntry { repo, status });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    if entries.is_empty() {
        output::print("No repositories found", verbosity);
        return Ok(());
    }

    let width = entries.iter().map(|e| e.repo.name.len()).max().unwrap_or(0);
    for entry in &entries {
        output::print(
            format!("{:width$}  {}", entry.repo.name, describe(entry.status.as_ref())),
            verbosity,
        );
    }
    Ok(())
}

fn describe(status: Option<&RepoStatus>) -> String {
    match status {
        Some(s) => format!("{} (ahead {}, behind {})", s.tracking, s.ahead, s.behind),
        None => "no upstream".to_string(),
    }
}
