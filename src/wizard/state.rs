//! wizard::state
//!
//! The record threaded through one wizard run.
//!
//! # Counter
//!
//! `counter` counts steps already answered before the run started. It is
//! computed once from the [`Seed`]: each non-empty seeded collection adds one.
//! Interactive answers never add to it; an automatic single-candidate choice
//! does, because nothing was asked. Going back from the confirm step clears
//! it so that entity selection is offered again.
//!
//! Every mutation is a by-value transformation so each step's effect can be
//! tested in isolation.

/// Caller-supplied partial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed<E, F> {
    /// Entities chosen up front
    pub entities: Vec<E>,
    /// Flags chosen up front
    pub flags: Vec<F>,
    /// Force (`Some(true)`) or skip (`Some(false)`) the confirm step
    pub confirm: Option<bool>,
}

impl<E, F> Default for Seed<E, F> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            flags: Vec::new(),
            confirm: None,
        }
    }
}

impl<E, F> Seed<E, F> {
    /// Pre-choose entities.
    pub fn with_entities(mut self, entities: Vec<E>) -> Self {
        self.entities = entities;
        self
    }

    /// Pre-choose flags.
    pub fn with_flags(mut self, flags: Vec<F>) -> Self {
        self.flags = flags;
        self
    }

    /// Override whether the confirm step is shown.
    pub fn with_confirm(mut self, confirm: Option<bool>) -> Self {
        self.confirm = confirm;
        self
    }
}

/// Accumulated state of a wizard run.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState<E, F> {
    counter: usize,
    confirm: Option<bool>,
    entities: Vec<E>,
    flags: Vec<F>,
}

impl<E, F> Default for WizardState<E, F> {
    fn default() -> Self {
        Self::from_seed(Seed::default())
    }
}

impl<E, F> From<Seed<E, F>> for WizardState<E, F> {
    fn from(seed: Seed<E, F>) -> Self {
        Self::from_seed(seed)
    }
}

impl<E, F> WizardState<E, F> {
    /// Build the initial state from a seed.
    pub fn from_seed(seed: Seed<E, F>) -> Self {
        let counter = usize::from(!seed.entities.is_empty()) + usize::from(!seed.flags.is_empty());
        Self {
            counter,
            confirm: seed.confirm,
            entities: seed.entities,
            flags: seed.flags,
        }
    }

    /// Steps considered already answered.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Confirm-step override.
    pub fn confirm(&self) -> Option<bool> {
        self.confirm
    }

    /// Chosen entities.
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// Chosen flags.
    pub fn flags(&self) -> &[F] {
        &self.flags
    }

    /// Whether entity selection must run.
    pub fn needs_entities(&self) -> bool {
        self.entities.is_empty() || self.counter < 1
    }

    /// Whether the confirm step is shown.
    pub fn should_confirm(&self) -> bool {
        self.confirm != Some(false)
    }

    /// Fold an interactive entity choice. Replaces any previous choice.
    pub fn with_entities(self, entities: Vec<E>) -> Self {
        Self { entities, ..self }
    }

    /// Fold an automatic choice of the only candidate.
    pub fn auto_selected(self, entity: E) -> Self {
        Self {
            counter: self.counter + 1,
            entities: vec![entity],
            ..self
        }
    }

    /// Fold a confirm choice.
    pub fn with_flags(self, flags: Vec<F>) -> Self {
        Self { flags, ..self }
    }

    /// Drop the pre-answered credit after going back from the confirm step.
    ///
    /// Entities are kept so the next pick step can pre-mark them.
    pub fn rewound(self) -> Self {
        Self { counter: 0, ..self }
    }
}
