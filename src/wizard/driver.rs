//! wizard::driver
//!
//! Runs a sequencer to completion against a [`Prompter`].
//!
//! # Design
//!
//! The sequencer never talks to the terminal. The driver owns that loop:
//! each suspended step is handed to the prompter and the returned selection
//! is fed back through [`StepSequencer::resume`]. Swapping the prompter is
//! how the same command runs against a real terminal or a test script.

use thiserror::Error;

use super::binding::CommandBinding;
use super::sequencer::{StepSequencer, Transition, WizardError};
use super::state::WizardState;
use super::step::{Selection, Step};

/// Errors a [`Prompter`] can report.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Something that can show a step and return the user's answer.
pub trait Prompter<E, F> {
    /// Show `step` and wait for a selection.
    ///
    /// A dismissed step should be reported as [`Selection::Back`]. Errors
    /// abort the run.
    fn prompt(&mut self, step: &Step<E, F>) -> Result<Selection<E, F>, PromptError>;
}

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E, F> {
    /// The command executed with this final state.
    Completed(WizardState<E, F>),
    /// The run terminated without executing.
    Cancelled,
}

impl<E, F> Outcome<E, F> {
    /// Whether the command executed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

/// Run `binding` interactively until it completes, cancels or fails.
///
/// # Errors
///
/// - [`WizardError::Collaborator`] if the binding fails
/// - [`WizardError::Prompt`] if the prompter fails
pub async fn run<B, P>(
    binding: &B,
    prompter: &mut P,
) -> Result<Outcome<B::Entity, B::Flag>, WizardError>
where
    B: CommandBinding,
    P: Prompter<B::Entity, B::Flag>,
{
    let mut sequencer = StepSequencer::new(binding);
    let mut transition = sequencer.start().await?;

    loop {
        match transition {
            Transition::Prompt(step) => {
                tracing::debug!(
                    command = binding.label(),
                    phase = %sequencer.phase(),
                    title = step.title(),
                    "prompting"
                );
                let selection = prompter.prompt(&step)?;
                transition = sequencer.resume(selection).await?;
            }
            Transition::Done(state) => return Ok(Outcome::Completed(state)),
            Transition::Cancelled => return Ok(Outcome::Cancelled),
        }
    }
}
