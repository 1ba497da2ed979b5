//! wizard
//!
//! A reusable engine for multi-step interactive commands.
//!
//! # Architecture
//!
//! - [`step`] - Pick and confirm steps, and the selections that answer them
//! - [`state`] - The record threaded through one run, with its skip counter
//! - [`binding`] - The contract a concrete command implements
//! - [`sequencer`] - The state machine that decides the next step
//! - [`driver`] - Loops a sequencer against a [`Prompter`]
//! - [`mock`] - Deterministic binding and prompter for tests
//!
//! # Flow
//!
//! A run has at most two suspension points: choose entities, then confirm
//! an action. Either may be skipped when the caller pre-answers it, and a
//! lone candidate is chosen without asking. After both are answered the
//! binding executes exactly once.

pub mod binding;
pub mod driver;
pub mod mock;
pub mod sequencer;
pub mod state;
pub mod step;

pub use binding::{CommandBinding, PendingChanges};
pub use driver::{run, Outcome, PromptError, Prompter};
pub use sequencer::{Call, Phase, StepSequencer, Transition, WizardError};
pub use state::{Seed, WizardState};
pub use step::{
    Candidate, ConfirmAction, ConfirmItem, ConfirmStep, PickItem, PickStep, Selection, Step,
};
