//! cli::commands::push
//!
//! Push workspace repositories through the wizard.
//!
//! # Pre-answering
//!
//! - Positional repositories skip the selection step
//! - `--force` makes Force Push the default choice. It always shows the
//!   confirmation step, so it cannot be combined with `--yes`
//! - `--yes` skips the confirmation step, `--confirm` forces it; otherwise
//!   the `push.confirm` config key decides. A skipped confirmation never
//!   force pushes
//!
//! # Example
//!
//! ```bash
//! # Choose interactively
//! repowiz push
//!
//! # Push two repositories without prompting
//! repowiz push api web --yes
//! ```

use anyhow::{bail, Result};

use super::load_config;
use crate::cli::Context;
use crate::push::{PushCommand, PushFlag};
use crate::ui::output::{self, pluralize, Verbosity};
use crate::ui::prompts::TerminalPrompter;
use crate::wizard::{run, Outcome, PromptError, Seed, WizardError};
use crate::workspace::{select_by_name, GitBackend, RepositoryBackend};

/// Run the push wizard.
pub fn push(ctx: &Context, repos: &[String], force: bool, confirm: Option<bool>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(push_async(ctx, repos, force, confirm))
}

async fn push_async(
    ctx: &Context,
    repos: &[String],
    force: bool,
    confirm: Option<bool>,
) -> Result<()> {
    let (root, config) = load_config(ctx)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let backend = GitBackend::from_config(&root, &config);

    let mut seed = Seed::default();
    if !repos.is_empty() {
        let all = backend.list().await?;
        seed = seed.with_entities(select_by_name(&all, repos)?);
    }
    let confirm = confirm.or_else(|| (!config.push_confirm()).then_some(false));
    if force {
        if confirm == Some(false) {
            output::warn(
                "--force always asks for confirmation; ignoring push.confirm = false",
                verbosity,
            );
        }
        seed = seed.with_flags(vec![PushFlag::Force]).with_confirm(Some(true));
    } else {
        seed = seed.with_confirm(confirm);
    }

    let command = PushCommand::new(backend, seed);
    let mut prompter = TerminalPrompter::new(ctx.interactive && config.interactive());

    match run(&command, &mut prompter).await {
        Ok(Outcome::Completed(state)) => {
            let names: Vec<&str> = state.entities().iter().map(|r| r.name.as_str()).collect();
            output::success(
                format!(
                    "Pushed {}",
                    pluralize(names.len(), "repository", "repositories")
                ),
                verbosity,
            );
            output::print(output::format_list(&names, "  "), verbosity);
            Ok(())
        }
        Ok(Outcome::Cancelled) => {
            output::print("Push cancelled", verbosity);
            Ok(())
        }
        Err(WizardError::Prompt(PromptError::NotInteractive)) => bail!(
            "push needs input but prompts are disabled; \
             name the repositories and pass --yes (without --force) to push unattended"
        ),
        Err(err) => Err(err.into()),
    }
}
