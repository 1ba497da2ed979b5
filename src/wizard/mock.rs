//! wizard::mock
//!
//! Deterministic binding and prompter for testing the wizard engine.
//!
//! # Example
//!
//! ```
//! use repowiz::wizard::mock::{MockBinding, MockEntity, MockFlag, ScriptedPrompter};
//! use repowiz::wizard::{run, Outcome, Selection};
//!
//! # tokio_test::block_on(async {
//! let binding = MockBinding::with_candidates(&["api", "web"]);
//! let mut prompter =
//!     ScriptedPrompter::<MockEntity, MockFlag>::new(vec![Selection::Back]);
//!
//! let outcome = run(&binding, &mut prompter).await.unwrap();
//! assert!(matches!(outcome, Outcome::Cancelled));
//! assert!(binding.executions().is_empty());
//! # });
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use super::binding::{CommandBinding, PendingChanges};
use super::driver::{PromptError, Prompter};
use super::state::{Seed, WizardState};
use super::step::{Candidate, ConfirmItem, ConfirmStep, Selection, Step};
use crate::ui::output::pluralize;

/// Entity used by [`MockBinding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEntity {
    id: String,
    label: String,
}

impl MockEntity {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }

    /// Same id, different display data.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Candidate for MockEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Flag used by [`MockBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFlag {
    Force,
}

/// Status used by [`MockBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockStatus {
    pub pending: usize,
}

impl PendingChanges for MockStatus {
    fn pending(&self) -> usize {
        self.pending
    }
}

/// Error raised by a configured failure.
#[derive(Debug, Clone, Error)]
#[error("mock failure: {0}")]
pub struct MockError(pub String);

/// Which collaborator call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Candidates,
    Status,
    Execute,
}

/// Recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Candidates,
    Status { id: String },
    Execute { entities: Vec<String>, flags: Vec<MockFlag> },
}

/// Mock command binding.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping, so clones share
/// their call log.
#[derive(Debug, Clone)]
pub struct MockBinding {
    inner: Arc<Mutex<MockBindingInner>>,
}

#[derive(Debug)]
struct MockBindingInner {
    candidates: Vec<MockEntity>,
    statuses: HashMap<String, MockStatus>,
    seed: Seed<MockEntity, MockFlag>,
    fail_on: Option<FailOn>,
    calls: Vec<MockCall>,
}

impl MockBinding {
    /// Create a binding offering entities with these ids.
    pub fn with_candidates(ids: &[&str]) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockBindingInner {
                candidates: ids.iter().map(|id| MockEntity::new(*id)).collect(),
                statuses: HashMap::new(),
                seed: Seed::default(),
                fail_on: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Report `pending` changes for entity `id`.
    pub fn with_status(self, id: &str, pending: usize) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.statuses.insert(id.to_string(), MockStatus { pending });
        }
        self
    }

    /// Supply an initial partial state.
    pub fn seeded(self, seed: Seed<MockEntity, MockFlag>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.seed = seed;
        }
        self
    }

    /// Make one collaborator call fail.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Recorded `execute` calls.
    pub fn executions(&self) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, MockCall::Execute { .. }))
            .collect()
    }

    /// Number of `candidates` calls.
    pub fn candidate_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Candidates))
            .count()
    }

    /// Number of `status` calls.
    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Status { .. }))
            .count()
    }

    fn record(&self, call: MockCall, fail: FailOn) -> Result<(), MockError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.fail_on == Some(fail) {
            return Err(MockError(format!("{:?}", fail)));
        }
        Ok(())
    }
}

#[async_trait]
impl CommandBinding for MockBinding {
    type Entity = MockEntity;
    type Flag = MockFlag;
    type Status = MockStatus;
    type Error = MockError;

    fn label(&self) -> &str {
        "Run"
    }

    fn seed(&self) -> Seed<MockEntity, MockFlag> {
        self.inner.lock().unwrap().seed.clone()
    }

    async fn candidates(&self) -> Result<Vec<MockEntity>, MockError> {
        self.record(MockCall::Candidates, FailOn::Candidates)?;
        Ok(self.inner.lock().unwrap().candidates.clone())
    }

    async fn status(&self, entity: &MockEntity) -> Result<Option<MockStatus>, MockError> {
        self.record(
            MockCall::Status {
                id: entity.id.clone(),
            },
            FailOn::Status,
        )?;
        Ok(self.inner.lock().unwrap().statuses.get(&entity.id).copied())
    }

    fn confirm_step(
        &self,
        entities: &[MockEntity],
        status: Option<&MockStatus>,
    ) -> ConfirmStep<MockFlag> {
        if let Some(status) = status {
            if status.pending == 0 {
                return ConfirmStep::cancel_only(
                    "Confirm Run",
                    ConfirmItem::cancel("Cancel Run").with_detail("Nothing to run"),
                );
            }
        }

        let detail = match status {
            Some(s) => format!("Will run {}", pluralize(s.pending, "change", "changes")),
            None => format!("Will run {}", pluralize(entities.len(), "entity", "entities")),
        };

        ConfirmStep::new(
            "Confirm Run",
            vec![
                ConfirmItem::proceed("Run", vec![]).with_detail(detail.clone()),
                ConfirmItem::proceed("Force Run", vec![MockFlag::Force])
                    .with_description("--force")
                    .with_detail(detail),
            ],
        )
    }

    async fn execute(&self, state: &WizardState<MockEntity, MockFlag>) -> Result<(), MockError> {
        self.record(
            MockCall::Execute {
                entities: state.entities().iter().map(|e| e.id.clone()).collect(),
                flags: state.flags().to_vec(),
            },
            FailOn::Execute,
        )
    }
}

/// Prompter that replays a fixed list of selections.
///
/// Every step it is asked to show is recorded. When the script runs out it
/// reports [`PromptError::Cancelled`].
#[derive(Debug)]
pub struct ScriptedPrompter<E, F> {
    script: VecDeque<Selection<E, F>>,
    shown: Vec<Step<E, F>>,
}

impl<E, F> ScriptedPrompter<E, F> {
    pub fn new(script: Vec<Selection<E, F>>) -> Self {
        Self {
            script: script.into(),
            shown: Vec::new(),
        }
    }

    /// Steps shown so far, in order.
    pub fn shown(&self) -> &[Step<E, F>] {
        &self.shown
    }
}

impl<E: Clone, F: Clone> Prompter<E, F> for ScriptedPrompter<E, F> {
    fn prompt(&mut self, step: &Step<E, F>) -> Result<Selection<E, F>, PromptError> {
        self.shown.push(step.clone());
        self.script.pop_front().ok_or(PromptError::Cancelled)
    }
}
