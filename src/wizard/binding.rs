//! wizard::binding
//!
//! The contract between the wizard engine and a concrete command.
//!
//! # Design
//!
//! The engine owns sequencing; the binding owns everything domain specific:
//! where candidates come from, what their status is, how each step reads,
//! and what happens once all steps are answered. The engine calls the
//! binding's async methods sequentially and never inspects the result of
//! [`CommandBinding::execute`] beyond success or failure.
//!
//! # Example
//!
//! ```ignore
//! use repowiz::wizard::{CommandBinding, ConfirmItem, ConfirmStep, Seed, WizardState};
//!
//! struct Deploy { targets: Vec<Target> }
//!
//! #[async_trait]
//! impl CommandBinding for Deploy {
//!     type Entity = Target;
//!     type Flag = DeployFlag;
//!     type Status = TargetStatus;
//!     type Error = DeployError;
//!
//!     fn label(&self) -> &str { "Deploy" }
//!
//!     async fn candidates(&self) -> Result<Vec<Target>, DeployError> {
//!         Ok(self.targets.clone())
//!     }
//!
//!     async fn status(&self, target: &Target) -> Result<Option<TargetStatus>, DeployError> {
//!         target.fetch_status().await
//!     }
//!
//!     fn confirm_step(&self, targets: &[Target], _: Option<&TargetStatus>) -> ConfirmStep<DeployFlag> {
//!         ConfirmStep::new("Confirm Deploy", vec![ConfirmItem::proceed("Deploy", vec![])])
//!     }
//!
//!     async fn execute(&self, state: &WizardState<Target, DeployFlag>) -> Result<(), DeployError> {
//!         deploy(state.entities(), state.flags()).await
//!     }
//! }
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use super::state::{Seed, WizardState};
use super::step::{Candidate, ConfirmItem, ConfirmStep, PickStep};

/// Status that reports how many changes are waiting.
pub trait PendingChanges {
    /// Number of pending changes (e.g. commits ahead of upstream).
    fn pending(&self) -> usize;
}

/// A command driven by the wizard engine.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a wizard can run on a
/// multi-threaded runtime.
#[async_trait]
pub trait CommandBinding: Send + Sync {
    /// Entities offered at the pick step.
    type Entity: Candidate;

    /// Flags chosen at the confirm step.
    type Flag: Clone + Debug + PartialEq + Send + Sync;

    /// Status of a single entity, used to shape the confirm step.
    type Status: PendingChanges + Debug + Send + Sync;

    /// Collaborator failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Display name of the command (e.g. "Push").
    fn label(&self) -> &str;

    /// Partial state supplied before the run starts.
    fn seed(&self) -> Seed<Self::Entity, Self::Flag> {
        Seed::default()
    }

    /// All candidates, in display order.
    async fn candidates(&self) -> Result<Vec<Self::Entity>, Self::Error>;

    /// Status of one entity, or `None` if it has none to report.
    async fn status(&self, entity: &Self::Entity) -> Result<Option<Self::Status>, Self::Error>;

    /// The entity pick step.
    ///
    /// Entities in `selected` must come back pre-marked.
    fn pick_step(
        &self,
        candidates: Vec<Self::Entity>,
        selected: &[Self::Entity],
    ) -> PickStep<Self::Entity> {
        PickStep::new(self.label(), "Choose items", candidates, selected)
    }

    /// Step shown when there is nothing to choose from.
    ///
    /// It must offer only the cancel directive.
    fn empty_step(&self) -> ConfirmStep<Self::Flag> {
        ConfirmStep::cancel_only(
            format!("Confirm {}", self.label()),
            ConfirmItem::cancel(format!("Cancel {}", self.label()))
                .with_detail("Nothing available to choose from"),
        )
    }

    /// The confirm step for the chosen entities.
    ///
    /// `status` is only fetched, and so only `Some`, when exactly one entity
    /// is chosen and the collaborator reports one.
    fn confirm_step(
        &self,
        entities: &[Self::Entity],
        status: Option<&Self::Status>,
    ) -> ConfirmStep<Self::Flag>;

    /// Perform the command. Called at most once per run.
    async fn execute(
        &self,
        state: &WizardState<Self::Entity, Self::Flag>,
    ) -> Result<(), Self::Error>;
}
