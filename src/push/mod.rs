//! push
//!
//! The push command expressed as a wizard [`CommandBinding`].
//!
//! # Steps
//!
//! 1. Choose repositories (skipped when given on the command line, or when
//!    the workspace holds exactly one)
//! 2. Confirm: push or force push. A single repository with nothing ahead of
//!    its upstream only offers to cancel. A seeded force flag lists Force
//!    Push first so it is the default choice.
//!
//! Skipping the confirm step always pushes without force.
//!
//! Execution pushes each chosen repository in order. A failure does not stop
//! the remaining pushes; all failures are reported together afterwards.
//!
//! # Example
//!
//! ```ignore
//! use repowiz::push::PushCommand;
//! use repowiz::ui::prompts::TerminalPrompter;
//! use repowiz::wizard::{run, Seed};
//! use repowiz::workspace::GitBackend;
//!
//! let command = PushCommand::new(GitBackend::new("."), Seed::default());
//! let outcome = run(&command, &mut TerminalPrompter::new(true)).await?;
//! ```

use std::fmt;

use async_trait::async_trait;

use crate::ui::output::pluralize;
use crate::wizard::{CommandBinding, ConfirmItem, ConfirmStep, PickStep, Seed, WizardState};
use crate::workspace::{BackendError, RepoStatus, Repository, RepositoryBackend};

/// Flags chosen at the push confirm step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushFlag {
    /// Overwrite the remote branch.
    Force,
}

impl fmt::Display for PushFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushFlag::Force => f.write_str("--force"),
        }
    }
}

/// Push one or more workspace repositories.
#[derive(Debug)]
pub struct PushCommand<B> {
    backend: B,
    seed: Seed<Repository, PushFlag>,
}

impl<B: RepositoryBackend> PushCommand<B> {
    /// Create the command over `backend`, pre-answered by `seed`.
    pub fn new(backend: B, seed: Seed<Repository, PushFlag>) -> Self {
        Self { backend, seed }
    }

    /// The backend repositories are read from.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn proceed_items(&self, detail: &str) -> Vec<ConfirmItem<PushFlag>> {
        let mut items = vec![
            ConfirmItem::proceed("Push", vec![]).with_detail(detail),
            ConfirmItem::proceed("Force Push", vec![PushFlag::Force])
                .with_description(PushFlag::Force.to_string())
                .with_detail(detail),
        ];
        if self.seed.flags.contains(&PushFlag::Force) {
            items.reverse();
        }
        items
    }
}

#[async_trait]
impl<B: RepositoryBackend> CommandBinding for PushCommand<B> {
    type Entity = Repository;
    type Flag = PushFlag;
    type Status = RepoStatus;
    type Error = BackendError;

    fn label(&self) -> &str {
        "Push"
    }

    fn seed(&self) -> Seed<Repository, PushFlag> {
        self.seed.clone()
    }

    async fn candidates(&self) -> Result<Vec<Repository>, BackendError> {
        self.backend.list().await
    }

    async fn status(&self, repo: &Repository) -> Result<Option<RepoStatus>, BackendError> {
        self.backend.status(repo).await
    }

    fn pick_step(
        &self,
        candidates: Vec<Repository>,
        selected: &[Repository],
    ) -> PickStep<Repository> {
        PickStep::new("Push", "Choose repositories", candidates, selected)
    }

    fn empty_step(&self) -> ConfirmStep<PushFlag> {
        ConfirmStep::cancel_only(
            "Confirm Push",
            ConfirmItem::cancel("Cancel Push").with_detail("No repositories found"),
        )
    }

    fn confirm_step(
        &self,
        repos: &[Repository],
        status: Option<&RepoStatus>,
    ) -> ConfirmStep<PushFlag> {
        if let [repo] = repos {
            return match status {
                Some(status) if status.ahead == 0 => ConfirmStep::cancel_only(
                    format!("Confirm Push ({})", repo.name),
                    ConfirmItem::cancel("Cancel Push").with_detail("No commits found to push"),
                ),
                Some(status) => ConfirmStep::new(
                    format!("Confirm Push ({})", repo.name),
                    self.proceed_items(&format!(
                        "Will push {} from {}",
                        pluralize(status.ahead, "commit", "commits"),
                        status.tracking
                    )),
                ),
                None => ConfirmStep::new(
                    format!("Confirm Push ({})", repo.name),
                    self.proceed_items(&format!(
                        "Will publish the current branch of {}",
                        repo.name
                    )),
                ),
            };
        }

        let count = pluralize(repos.len(), "repository", "repositories");
        ConfirmStep::new(
            format!("Confirm Push ({count})"),
            self.proceed_items(&format!("Will push {count}")),
        )
    }

    async fn execute(
        &self,
        state: &WizardState<Repository, PushFlag>,
    ) -> Result<(), BackendError> {
        let force = state.flags().contains(&PushFlag::Force);
        let mut failures = Vec::new();

        for repo in state.entities() {
            match self.backend.push(repo, force).await {
                Ok(()) => tracing::info!(repo = %repo.name, force, "pushed"),
                Err(err) => {
                    tracing::warn!(repo = %repo.name, error = %err, "push failed");
                    failures.push((repo.name.clone(), err.to_string()));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BackendError::PushFailed { failures })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::mock::ScriptedPrompter;
    use crate::wizard::{run, Outcome, Selection, Step, StepSequencer, Transition, WizardError};
    use crate::workspace::mock::{MockBackend, MockOperation};

    type Script = ScriptedPrompter<Repository, PushFlag>;

    fn command(backend: MockBackend) -> PushCommand<MockBackend> {
        PushCommand::new(backend, Seed::default())
    }

    fn confirm(step: &Step<Repository, PushFlag>) -> &ConfirmStep<PushFlag> {
        match step {
            Step::Confirm(c) => c,
            other => panic!("expected confirm step, got {other:?}"),
        }
    }

    mod confirm_step {
        use super::*;

        #[test]
        fn several_repositories_titled_with_count() {
            let backend = MockBackend::new().with_repo("api", Some(1)).with_repo("web", Some(1));
            let cmd = command(backend.clone());

            let step = cmd.confirm_step(&backend.repositories(), None);
            assert_eq!(step.title, "Confirm Push (2 repositories)");
            assert_eq!(step.items.len(), 2);
            assert_eq!(step.items[0].label, "Push");
            assert_eq!(step.items[1].label, "Force Push");
            assert_eq!(step.items[1].description.as_deref(), Some("--force"));
            assert_eq!(step.items[0].detail.as_deref(), Some("Will push 2 repositories"));
        }

        #[test]
        fn seeded_force_is_listed_first() {
            let backend = MockBackend::new().with_repo("api", Some(1)).with_repo("web", Some(1));
            let cmd = PushCommand::new(
                backend.clone(),
                Seed::default().with_flags(vec![PushFlag::Force]),
            );

            let step = cmd.confirm_step(&backend.repositories(), None);
            assert_eq!(step.items[0].label, "Force Push");
            assert_eq!(step.items[1].label, "Push");
        }

        #[test]
        fn nothing_ahead_only_cancels() {
            let backend = MockBackend::new().with_repo("api", Some(0));
            let cmd = command(backend.clone());
            let status = RepoStatus {
                tracking: crate::core::types::Tracking {
                    branch: "main".into(),
                    upstream: "origin/main".into(),
                },
                ahead: 0,
                behind: 2,
            };

            let step = cmd.confirm_step(&backend.repositories(), Some(&status));
            assert!(step.is_cancel_only());
            assert_eq!(step.items[0].detail.as_deref(), Some("No commits found to push"));
        }

        #[test]
        fn commit_count_pluralized_with_tracking() {
            let backend = MockBackend::new().with_repo("api", Some(1));
            let cmd = command(backend.clone());
            let mut status = RepoStatus {
                tracking: crate::core::types::Tracking {
                    branch: "main".into(),
                    upstream: "origin/main".into(),
                },
                ahead: 1,
                behind: 0,
            };

            let one = cmd.confirm_step(&backend.repositories(), Some(&status));
            assert_eq!(
                one.items[0].detail.as_deref(),
                Some("Will push 1 commit from main to origin/main")
            );

            status.ahead = 3;
            let three = cmd.confirm_step(&backend.repositories(), Some(&status));
            let detail = three.items[0].detail.clone().unwrap();
            assert!(detail.contains("3 commits"));
            assert_eq!(three.title, "Confirm Push (api)");
        }

        #[test]
        fn unpublished_branch_offers_push() {
            let backend = MockBackend::new().with_repo("api", None);
            let cmd = command(backend.clone());

            let step = cmd.confirm_step(&backend.repositories(), None);
            assert_eq!(step.items.len(), 2);
            assert_eq!(
                step.items[0].detail.as_deref(),
                Some("Will publish the current branch of api")
            );
        }
    }

    mod wizard {
        use super::*;

        #[tokio::test]
        async fn single_repository_pushes_without_pick() {
            let backend = MockBackend::new().with_repo("api", Some(2));
            let cmd = command(backend.clone());
            let mut seq = StepSequencer::new(&cmd);

            let Transition::Prompt(step) = seq.start().await.unwrap() else {
                panic!("expected a prompt");
            };
            let step = confirm(&step).clone();
            assert_eq!(seq.state().counter(), 1);

            let t = seq
                .resume(Selection::Choice(step.items[0].clone()))
                .await
                .unwrap();
            assert!(matches!(t, Transition::Done(_)));
            assert_eq!(backend.pushes(), vec![("api".to_string(), false)]);
        }

        #[tokio::test]
        async fn force_push_of_chosen_repositories() {
            let backend = MockBackend::new()
                .with_repo("api", Some(1))
                .with_repo("docs", Some(0))
                .with_repo("web", Some(4));
            let cmd = command(backend.clone());
            let api = backend.repo("api").unwrap();
            let web = backend.repo("web").unwrap();

            let detail = "Will push 2 repositories";
            let force = ConfirmItem::proceed("Force Push", vec![PushFlag::Force])
                .with_description("--force")
                .with_detail(detail);
            let mut prompter = Script::new(vec![
                Selection::Entities(vec![web, api]),
                Selection::Choice(force),
            ]);

            let outcome = run(&cmd, &mut prompter).await.unwrap();

            let Outcome::Completed(state) = outcome else {
                panic!("expected completion");
            };
            assert_eq!(state.flags(), &[PushFlag::Force]);
            assert_eq!(
                backend.pushes(),
                vec![("web".to_string(), true), ("api".to_string(), true)]
            );
            // Several repositories never fetch a status.
            assert!(!backend
                .operations()
                .iter()
                .any(|op| matches!(op, MockOperation::Status { .. })));
        }

        #[tokio::test]
        async fn up_to_date_repository_cancels() {
            let backend = MockBackend::new().with_repo("api", Some(0));
            let cmd = command(backend.clone());
            let mut prompter = Script::new(vec![Selection::Choice(
                ConfirmItem::cancel("Cancel Push").with_detail("No commits found to push"),
            )]);

            let outcome = run(&cmd, &mut prompter).await.unwrap();

            assert_eq!(outcome, Outcome::Cancelled);
            assert!(backend.pushes().is_empty());
        }

        #[tokio::test]
        async fn empty_workspace_offers_cancel_only() {
            let backend = MockBackend::new();
            let cmd = command(backend.clone());
            let mut prompter = Script::new(vec![Selection::Back]);

            let outcome = run(&cmd, &mut prompter).await.unwrap();

            assert_eq!(outcome, Outcome::Cancelled);
            let step = confirm(&prompter.shown()[0]);
            assert!(step.is_cancel_only());
            assert_eq!(step.items[0].detail.as_deref(), Some("No repositories found"));
        }

        #[tokio::test]
        async fn seeded_and_unconfirmed_runs_unattended() {
            let backend = MockBackend::new().with_repo("api", Some(1)).with_repo("web", Some(1));
            let web = backend.repo("web").unwrap();
            let cmd = PushCommand::new(
                backend.clone(),
                Seed::default()
                    .with_entities(vec![web])
                    .with_flags(vec![PushFlag::Force])
                    .with_confirm(Some(false)),
            );
            let mut prompter = Script::new(vec![]);

            let outcome = run(&cmd, &mut prompter).await.unwrap();

            assert!(outcome.is_completed());
            assert!(prompter.shown().is_empty());
            // Without a confirm step there is no force push.
            assert_eq!(backend.pushes(), vec![("web".to_string(), false)]);
        }

        #[tokio::test]
        async fn failures_reported_after_all_pushes() {
            let backend = MockBackend::new()
                .with_repo("api", Some(1))
                .with_repo("web", Some(1))
                .failing_push("api");
            let cmd = PushCommand::new(
                backend.clone(),
                Seed::default()
                    .with_entities(backend.repositories())
                    .with_confirm(Some(false)),
            );
            let mut prompter = Script::new(vec![]);

            let err = run(&cmd, &mut prompter).await.unwrap_err();

            assert_eq!(backend.pushes().len(), 2);
            let WizardError::Collaborator { command, source, .. } = err else {
                panic!("expected collaborator error");
            };
            assert_eq!(command, "Push");
            assert!(source.to_string().starts_with("failed to push 1 repository: api"));
        }

        #[tokio::test]
        async fn list_failure_fails_wizard() {
            let backend = MockBackend::new().failing_list();
            let cmd = command(backend);
            let mut prompter = Script::new(vec![]);

            let err = run(&cmd, &mut prompter).await.unwrap_err();
            assert!(err.is_collaborator());
        }
    }

    #[test]
    fn force_flag_displays_as_option() {
        assert_eq!(PushFlag::Force.to_string(), "--force");
    }
}
