//! wizard::sequencer
//!
//! The step-sequencing state machine.
//!
//! # Lifecycle
//!
//! ```text
//! START -> SELECT_ENTITIES -> CONFIRM -> EXECUTE -> DONE
//! SELECT_ENTITIES --(invalid selection)--> CANCELLED
//! CONFIRM --(invalid selection, entities were chosen)--> SELECT_ENTITIES
//! CONFIRM --(invalid selection, single candidate)--> CANCELLED
//! CONFIRM --(cancel directive)--> CANCELLED
//! any step --(collaborator error)--> FAILED
//! ```
//!
//! The sequencer suspends only at `SELECT_ENTITIES` and `CONFIRM`. The caller
//! drives it with [`StepSequencer::start`] and then [`StepSequencer::resume`]
//! once per shown step. Between suspensions it awaits the binding's
//! collaborators one at a time.
//!
//! # Invariants
//!
//! - `execute` is called at most once, and only after both phases
//! - A terminated sequencer cannot be resumed
//! - Invalid selections are control flow, never errors

use std::fmt;

use thiserror::Error;

use super::binding::{CommandBinding, PendingChanges};
use super::driver::PromptError;
use super::state::WizardState;
use super::step::{Candidate, ConfirmAction, ConfirmStep, PickStep, Selection, Step};

/// Named points of the wizard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet.
    Start,
    /// Suspended at the pick step.
    SelectEntities,
    /// Suspended at the confirm step.
    Confirm,
    /// Executed successfully.
    Done,
    /// Terminated without executing.
    Cancelled,
    /// A collaborator failed.
    Failed,
}

impl Phase {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Cancelled | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::SelectEntities => "select-entities",
            Phase::Confirm => "confirm",
            Phase::Done => "done",
            Phase::Cancelled => "cancelled",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Which collaborator call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Candidates,
    Status,
    Execute,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Call::Candidates => "listing candidates",
            Call::Status => "fetching status",
            Call::Execute => "execution",
        };
        f.write_str(name)
    }
}

/// Errors from driving a wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A binding collaborator failed; the wizard is now `Failed`.
    #[error("{command}: {call} failed: {source}")]
    Collaborator {
        /// Display name of the command
        command: String,
        /// The failing call
        call: Call,
        /// The underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `resume` was called before `start`.
    #[error("wizard has not been started")]
    NotStarted,

    /// `start` was called twice.
    #[error("wizard already started")]
    AlreadyStarted,

    /// The wizard already terminated.
    #[error("wizard already terminated ({0})")]
    Terminated(Phase),

    /// The driver could not obtain a selection.
    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),
}

impl WizardError {
    /// Check if a collaborator failed.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, WizardError::Collaborator { .. })
    }
}

/// Result of advancing the sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<E, F> {
    /// Suspended: show this step and resume with the user's selection.
    Prompt(Step<E, F>),
    /// All steps answered and the command executed.
    Done(WizardState<E, F>),
    /// Terminated without executing.
    Cancelled,
}

enum Stage<E, F> {
    Start,
    AwaitingPick(PickStep<E>),
    AwaitingConfirm(ConfirmStep<F>),
    Finished(Phase),
}

type Entity<B> = <B as CommandBinding>::Entity;
type Flag<B> = <B as CommandBinding>::Flag;

/// Drives one run of a [`CommandBinding`].
pub struct StepSequencer<'a, B: CommandBinding> {
    binding: &'a B,
    state: WizardState<Entity<B>, Flag<B>>,
    stage: Stage<Entity<B>, Flag<B>>,
    /// False once the run has nothing to go back to (single candidate or
    /// none at all), making back at the confirm step terminate.
    rewindable: bool,
}

impl<'a, B: CommandBinding> StepSequencer<'a, B> {
    /// Create a sequencer seeded from the binding.
    pub fn new(binding: &'a B) -> Self {
        Self::with_state(binding, WizardState::from_seed(binding.seed()))
    }

    /// Create a sequencer with an explicit initial state.
    pub fn with_state(binding: &'a B, state: WizardState<Entity<B>, Flag<B>>) -> Self {
        Self {
            binding,
            state,
            stage: Stage::Start,
            rewindable: true,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match &self.stage {
            Stage::Start => Phase::Start,
            Stage::AwaitingPick(_) => Phase::SelectEntities,
            Stage::AwaitingConfirm(_) => Phase::Confirm,
            Stage::Finished(phase) => *phase,
        }
    }

    /// State accumulated so far.
    pub fn state(&self) -> &WizardState<Entity<B>, Flag<B>> {
        &self.state
    }

    /// Begin the run.
    ///
    /// # Errors
    ///
    /// - [`WizardError::AlreadyStarted`] if called more than once
    /// - [`WizardError::Collaborator`] if a collaborator fails
    pub async fn start(&mut self) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        match self.stage {
            Stage::Start => self.select_entities().await,
            Stage::Finished(phase) => Err(WizardError::Terminated(phase)),
            _ => Err(WizardError::AlreadyStarted),
        }
    }

    /// Answer the step returned by the previous transition.
    ///
    /// # Errors
    ///
    /// - [`WizardError::NotStarted`] if `start` has not been called
    /// - [`WizardError::Terminated`] if the run already ended
    /// - [`WizardError::Collaborator`] if a collaborator fails
    pub async fn resume(
        &mut self,
        selection: Selection<Entity<B>, Flag<B>>,
    ) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        match std::mem::replace(&mut self.stage, Stage::Start) {
            Stage::AwaitingPick(step) => self.on_pick(step, selection).await,
            Stage::AwaitingConfirm(step) => self.on_confirm(step, selection).await,
            Stage::Start => Err(WizardError::NotStarted),
            Stage::Finished(phase) => {
                self.stage = Stage::Finished(phase);
                Err(WizardError::Terminated(phase))
            }
        }
    }

    async fn select_entities(&mut self) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        if !self.state.needs_entities() {
            tracing::debug!(
                command = self.binding.label(),
                counter = self.state.counter(),
                "entities pre-answered, skipping selection"
            );
            return self.confirm().await;
        }

        let mut candidates = self
            .binding
            .candidates()
            .await
            .map_err(|e| self.fail(Call::Candidates, e))?;

        match candidates.len() {
            0 => {
                tracing::debug!(command = self.binding.label(), "no candidates");
                self.rewindable = false;
                let step = self.binding.empty_step();
                Ok(self.suspend_confirm(step))
            }
            1 => {
                let only = candidates.remove(0);
                tracing::debug!(
                    command = self.binding.label(),
                    entity = only.id(),
                    "single candidate, selected automatically"
                );
                self.rewindable = false;
                self.state = std::mem::take(&mut self.state).auto_selected(only);
                self.confirm().await
            }
            _ => {
                let step = self.binding.pick_step(candidates, self.state.entities());
                self.stage = Stage::AwaitingPick(step.clone());
                Ok(Transition::Prompt(Step::Pick(step)))
            }
        }
    }

    async fn on_pick(
        &mut self,
        step: PickStep<Entity<B>>,
        selection: Selection<Entity<B>, Flag<B>>,
    ) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        let offered = match &selection {
            Selection::Entities(chosen) => step.resolve(chosen),
            _ => None,
        };

        match offered {
            Some(entities) => {
                self.state = std::mem::take(&mut self.state).with_entities(entities);
                self.confirm().await
            }
            None => {
                if !matches!(selection, Selection::Back) {
                    tracing::warn!(
                        command = self.binding.label(),
                        "invalid selection at entity step"
                    );
                }
                Ok(self.finish_cancelled())
            }
        }
    }

    async fn confirm(&mut self) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        if !self.state.should_confirm() {
            tracing::debug!(command = self.binding.label(), "confirmation skipped");
            self.state = std::mem::take(&mut self.state).with_flags(Vec::new());
            return self.execute().await;
        }

        let status = match self.state.entities() {
            [only] => {
                let only = only.clone();
                let status = self
                    .binding
                    .status(&only)
                    .await
                    .map_err(|e| self.fail(Call::Status, e))?;
                tracing::debug!(
                    command = self.binding.label(),
                    entity = only.id(),
                    pending = status.as_ref().map(PendingChanges::pending),
                    "status fetched"
                );
                status
            }
            _ => None,
        };

        let step = self
            .binding
            .confirm_step(self.state.entities(), status.as_ref());
        Ok(self.suspend_confirm(step))
    }

    async fn on_confirm(
        &mut self,
        step: ConfirmStep<Flag<B>>,
        selection: Selection<Entity<B>, Flag<B>>,
    ) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        match selection {
            Selection::Choice(item) if step.offers(&item) => match item.action {
                ConfirmAction::Cancel => Ok(self.finish_cancelled()),
                ConfirmAction::Proceed(flags) => {
                    self.state = std::mem::take(&mut self.state).with_flags(flags);
                    self.execute().await
                }
            },
            other => {
                if !matches!(other, Selection::Back) {
                    tracing::warn!(
                        command = self.binding.label(),
                        "invalid selection at confirm step"
                    );
                }
                if !self.rewindable {
                    return Ok(self.finish_cancelled());
                }
                self.state = std::mem::take(&mut self.state).rewound();
                self.select_entities().await
            }
        }
    }

    async fn execute(&mut self) -> Result<Transition<Entity<B>, Flag<B>>, WizardError> {
        tracing::debug!(
            command = self.binding.label(),
            entities = self.state.entities().len(),
            flags = ?self.state.flags(),
            "executing"
        );

        self.binding
            .execute(&self.state)
            .await
            .map_err(|e| self.fail(Call::Execute, e))?;

        self.stage = Stage::Finished(Phase::Done);
        Ok(Transition::Done(self.state.clone()))
    }

    fn suspend_confirm(&mut self, step: ConfirmStep<Flag<B>>) -> Transition<Entity<B>, Flag<B>> {
        self.stage = Stage::AwaitingConfirm(step.clone());
        Transition::Prompt(Step::Confirm(step))
    }

    fn finish_cancelled(&mut self) -> Transition<Entity<B>, Flag<B>> {
        tracing::debug!(command = self.binding.label(), "cancelled");
        self.stage = Stage::Finished(Phase::Cancelled);
        Transition::Cancelled
    }

    fn fail(&mut self, call: Call, err: B::Error) -> WizardError {
        let command = self.binding.label().to_string();
        tracing::error!(command = %command, %call, error = %err, "collaborator failed");
        self.stage = Stage::Finished(Phase::Failed);
        WizardError::Collaborator {
            command,
            call,
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::mock::{FailOn, MockBinding, MockCall, MockEntity, MockFlag};
    use crate::wizard::state::Seed;
    use crate::wizard::step::ConfirmItem;

    fn entity(id: &str) -> MockEntity {
        MockEntity::new(id)
    }

    fn pick(transition: Transition<MockEntity, MockFlag>) -> PickStep<MockEntity> {
        match transition {
            Transition::Prompt(Step::Pick(step)) => step,
            other => panic!("expected pick step, got {other:?}"),
        }
    }

    fn confirm(transition: Transition<MockEntity, MockFlag>) -> ConfirmStep<MockFlag> {
        match transition {
            Transition::Prompt(Step::Confirm(step)) => step,
            other => panic!("expected confirm step, got {other:?}"),
        }
    }

    fn done(transition: Transition<MockEntity, MockFlag>) -> WizardState<MockEntity, MockFlag> {
        match transition {
            Transition::Done(state) => state,
            other => panic!("expected done, got {other:?}"),
        }
    }

    mod entity_selection {
        use super::*;

        #[tokio::test]
        async fn several_candidates_prompt_pick_first() {
            let binding = MockBinding::with_candidates(&["api", "web", "docs"]);
            let mut seq = StepSequencer::new(&binding);

            let step = pick(seq.start().await.unwrap());
            assert_eq!(step.items.len(), 3);
            assert!(step.multi);
            assert_eq!(step.picked().count(), 0);
            assert_eq!(seq.phase(), Phase::SelectEntities);
        }

        #[tokio::test]
        async fn single_candidate_is_auto_selected() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 2);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            assert_eq!(step.items.len(), 2);
            assert_eq!(seq.state().counter(), 1);
            assert_eq!(seq.state().entities(), &[entity("api")]);
        }

        #[tokio::test]
        async fn no_candidates_offers_cancel_only() {
            let binding = MockBinding::with_candidates(&[]);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            assert!(step.is_cancel_only());

            let item = step.items[0].clone();
            let t = seq.resume(Selection::Choice(item)).await.unwrap();
            assert_eq!(t, Transition::Cancelled);
        }

        #[tokio::test]
        async fn back_from_empty_step_cancels() {
            let binding = MockBinding::with_candidates(&[]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let t = seq.resume(Selection::Back).await.unwrap();
            assert_eq!(t, Transition::Cancelled);
            assert_eq!(binding.candidate_calls(), 1);
        }

        #[tokio::test]
        async fn empty_pick_cancels() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let t = seq.resume(Selection::Entities(vec![])).await.unwrap();
            assert_eq!(t, Transition::Cancelled);
            assert_eq!(seq.phase(), Phase::Cancelled);
        }

        #[tokio::test]
        async fn unknown_entity_cancels() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let t = seq
                .resume(Selection::Entities(vec![entity("ghost")]))
                .await
                .unwrap();
            assert_eq!(t, Transition::Cancelled);
        }

        #[tokio::test]
        async fn choice_at_pick_step_cancels() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let t = seq
                .resume(Selection::Choice(ConfirmItem::proceed("Run", vec![])))
                .await
                .unwrap();
            assert_eq!(t, Transition::Cancelled);
            assert!(binding.executions().is_empty());
        }

        #[tokio::test]
        async fn chosen_entities_are_the_offered_ones() {
            let binding = MockBinding::with_candidates(&["api", "web"])
                .seeded(Seed::default().with_confirm(Some(false)));
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let state = done(
                seq.resume(Selection::Entities(vec![entity("web").with_label("forged")]))
                    .await
                    .unwrap(),
            );
            assert_eq!(state.entities(), &[entity("web")]);
            assert_eq!(state.entities()[0].label(), "web");
        }

        #[tokio::test]
        async fn seeded_entities_skip_pick() {
            let binding = MockBinding::with_candidates(&["api", "web"])
                .seeded(Seed::default().with_entities(vec![entity("api"), entity("web")]));
            let mut seq = StepSequencer::new(&binding);

            confirm(seq.start().await.unwrap());
            assert_eq!(binding.candidate_calls(), 0);
        }
    }

    mod confirmation {
        use super::*;

        #[tokio::test]
        async fn multi_entity_offers_plain_and_force() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let step = confirm(
                seq.resume(Selection::Entities(vec![entity("api"), entity("web")]))
                    .await
                    .unwrap(),
            );
            assert_eq!(step.items.len(), 2);
            // Status is only consulted for a single entity.
            assert_eq!(binding.status_calls(), 0);
        }

        #[tokio::test]
        async fn nothing_pending_offers_cancel_only() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 0);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            assert!(step.is_cancel_only());
            assert_eq!(step.items.len(), 1);

            let t = seq
                .resume(Selection::Choice(step.items[0].clone()))
                .await
                .unwrap();
            assert_eq!(t, Transition::Cancelled);
            assert!(binding.executions().is_empty());
        }

        #[tokio::test]
        async fn force_choice_executes_with_force() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 3);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            let force = step.items[1].clone();
            let state = done(seq.resume(Selection::Choice(force)).await.unwrap());

            assert_eq!(state.flags(), &[MockFlag::Force]);
            assert_eq!(
                binding.executions(),
                vec![MockCall::Execute {
                    entities: vec!["api".to_string()],
                    flags: vec![MockFlag::Force],
                }]
            );
        }

        #[tokio::test]
        async fn plain_choice_executes_without_flags() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 3);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            let state = done(
                seq.resume(Selection::Choice(step.items[0].clone()))
                    .await
                    .unwrap(),
            );
            assert!(state.flags().is_empty());
            assert_eq!(binding.executions().len(), 1);
        }

        #[tokio::test]
        async fn foreign_item_is_treated_as_back() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();
            seq.resume(Selection::Entities(vec![entity("web")]))
                .await
                .unwrap();

            let t = seq
                .resume(Selection::Choice(ConfirmItem::proceed(
                    "Not offered",
                    vec![MockFlag::Force],
                )))
                .await
                .unwrap();
            let step = pick(t);
            assert_eq!(step.picked().map(|e| e.id()).collect::<Vec<_>>(), vec!["web"]);
            assert!(binding.executions().is_empty());
        }

        #[tokio::test]
        async fn skipped_confirmation_executes_immediately() {
            let binding = MockBinding::with_candidates(&["api", "web"])
                .seeded(Seed::default().with_confirm(Some(false)));
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let state = done(
                seq.resume(Selection::Entities(vec![entity("api")]))
                    .await
                    .unwrap(),
            );
            assert!(state.flags().is_empty());
            assert_eq!(binding.status_calls(), 0);
        }

        #[tokio::test]
        async fn skipped_confirmation_clears_seeded_flags() {
            let binding = MockBinding::with_candidates(&["api"]).seeded(
                Seed::default()
                    .with_flags(vec![MockFlag::Force])
                    .with_confirm(Some(false)),
            );
            let mut seq = StepSequencer::new(&binding);

            let state = done(seq.start().await.unwrap());
            assert!(state.flags().is_empty());
            assert_eq!(
                binding.executions(),
                vec![MockCall::Execute {
                    entities: vec!["api".to_string()],
                    flags: vec![],
                }]
            );
        }
    }

    mod back_navigation {
        use super::*;

        #[tokio::test]
        async fn back_at_confirm_reoffers_pick_with_previous_choice() {
            let binding = MockBinding::with_candidates(&["api", "web", "docs"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();
            seq.resume(Selection::Entities(vec![entity("docs"), entity("api")]))
                .await
                .unwrap();

            let step = pick(seq.resume(Selection::Back).await.unwrap());
            let picked: Vec<_> = step.picked().map(|e| e.id()).collect();
            assert_eq!(picked, vec!["api", "docs"]);
            assert_eq!(binding.candidate_calls(), 2);
        }

        #[tokio::test]
        async fn back_at_confirm_after_auto_select_cancels() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 1);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            let t = seq.resume(Selection::Back).await.unwrap();
            assert_eq!(t, Transition::Cancelled);
            assert!(binding.executions().is_empty());
        }

        #[tokio::test]
        async fn back_after_seeded_entities_reoffers_pick() {
            let binding = MockBinding::with_candidates(&["api", "web"])
                .seeded(Seed::default().with_entities(vec![entity("web"), entity("api")]));
            let mut seq = StepSequencer::new(&binding);
            confirm(seq.start().await.unwrap());

            let step = pick(seq.resume(Selection::Back).await.unwrap());
            assert_eq!(step.picked().count(), 2);
            assert_eq!(seq.state().counter(), 0);
        }

        #[tokio::test]
        async fn back_at_pick_cancels() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();

            assert_eq!(
                seq.resume(Selection::Back).await.unwrap(),
                Transition::Cancelled
            );
        }
    }

    mod failures {
        use super::*;

        #[tokio::test]
        async fn candidate_failure_propagates() {
            let binding = MockBinding::with_candidates(&["api", "web"]).fail_on(FailOn::Candidates);
            let mut seq = StepSequencer::new(&binding);

            let err = seq.start().await.unwrap_err();
            match err {
                WizardError::Collaborator { command, call, .. } => {
                    assert_eq!(command, "Run");
                    assert_eq!(call, Call::Candidates);
                }
                other => panic!("expected collaborator error, got {other:?}"),
            }
            assert_eq!(seq.phase(), Phase::Failed);
        }

        #[tokio::test]
        async fn status_failure_propagates() {
            let binding = MockBinding::with_candidates(&["api"]).fail_on(FailOn::Status);
            let mut seq = StepSequencer::new(&binding);

            let err = seq.start().await.unwrap_err();
            assert!(err.is_collaborator());
            assert!(binding.executions().is_empty());
        }

        #[tokio::test]
        async fn execute_failure_propagates_once() {
            let binding = MockBinding::with_candidates(&["api"])
                .with_status("api", 1)
                .fail_on(FailOn::Execute);
            let mut seq = StepSequencer::new(&binding);

            let step = confirm(seq.start().await.unwrap());
            let err = seq
                .resume(Selection::Choice(step.items[0].clone()))
                .await
                .unwrap_err();
            assert!(err.to_string().starts_with("Run: execution failed"));
            assert_eq!(binding.executions().len(), 1);
            assert_eq!(seq.phase(), Phase::Failed);
        }
    }

    mod lifecycle {
        use super::*;

        #[tokio::test]
        async fn resume_before_start_is_an_error() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            let err = seq.resume(Selection::Back).await.unwrap_err();
            assert!(matches!(err, WizardError::NotStarted));
        }

        #[tokio::test]
        async fn start_twice_is_an_error() {
            let binding = MockBinding::with_candidates(&["api", "web"]);
            let mut seq = StepSequencer::new(&binding);
            seq.start().await.unwrap();
            assert!(matches!(
                seq.start().await.unwrap_err(),
                WizardError::AlreadyStarted
            ));
        }

        #[tokio::test]
        async fn finished_run_cannot_resume() {
            let binding = MockBinding::with_candidates(&["api"]).with_status("api", 1);
            let mut seq = StepSequencer::new(&binding);
            let step = confirm(seq.start().await.unwrap());
            done(
                seq.resume(Selection::Choice(step.items[0].clone()))
                    .await
                    .unwrap(),
            );

            let err = seq
                .resume(Selection::Choice(step.items[0].clone()))
                .await
                .unwrap_err();
            assert!(matches!(err, WizardError::Terminated(Phase::Done)));
            assert_eq!(binding.executions().len(), 1);
        }

        #[test]
        fn terminal_phases() {
            assert!(Phase::Done.is_terminal());
            assert!(Phase::Cancelled.is_terminal());
            assert!(Phase::Failed.is_terminal());
            assert!(!Phase::Confirm.is_terminal());
            assert!(!Phase::SelectEntities.is_terminal());
            assert!(!Phase::Start.is_terminal());
        }
    }
}
