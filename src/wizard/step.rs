//! wizard::step
//!
//! Steps shown to the user and the selections that answer them.
//!
//! A [`Step`] is immutable once built. It never touches wizard state; the
//! sequencer folds the returned [`Selection`] into state after validating it
//! against the step that produced it.

use std::fmt;

/// An entity that can be offered in a pick step.
///
/// Identity is by [`Candidate::id`]: two values with the same id are the
/// same entity even if their display data differs.
pub trait Candidate: Clone + fmt::Debug + Send + Sync {
    /// Stable identifier.
    fn id(&self) -> &str;

    /// Primary display text.
    fn label(&self) -> String;

    /// Secondary display text.
    fn description(&self) -> Option<String> {
        None
    }
}

/// One point of interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<E, F> {
    /// Choose one or more entities.
    Pick(PickStep<E>),
    /// Choose exactly one action.
    Confirm(ConfirmStep<F>),
}

impl<E, F> Step<E, F> {
    /// Title shown above the step.
    pub fn title(&self) -> &str {
        match self {
            Step::Pick(step) => &step.title,
            Step::Confirm(step) => &step.title,
        }
    }

    /// Whether this is a pick step.
    pub fn is_pick(&self) -> bool {
        matches!(self, Step::Pick(_))
    }

    /// Whether this is a confirm step.
    pub fn is_confirm(&self) -> bool {
        matches!(self, Step::Confirm(_))
    }
}

/// An entity in a pick step.
#[derive(Debug, Clone, PartialEq)]
pub struct PickItem<E> {
    /// The entity offered
    pub entity: E,
    /// Pre-marked as selected when the step is shown
    pub picked: bool,
}

/// A step choosing N of M entities.
#[derive(Debug, Clone, PartialEq)]
pub struct PickStep<E> {
    /// Title shown above the list
    pub title: String,
    /// Hint shown in the input area
    pub placeholder: String,
    /// Allow more than one entity to be chosen
    pub multi: bool,
    /// Offered entities, in display order
    pub items: Vec<PickItem<E>>,
}

impl<E: Candidate> PickStep<E> {
    /// Build a multi-select step over `candidates`.
    ///
    /// Candidates whose id appears in `selected` are pre-marked.
    pub fn new(
        title: impl Into<String>,
        placeholder: impl Into<String>,
        candidates: Vec<E>,
        selected: &[E],
    ) -> Self {
        let items = candidates
            .into_iter()
            .map(|entity| PickItem {
                picked: selected.iter().any(|s| s.id() == entity.id()),
                entity,
            })
            .collect();

        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            multi: true,
            items,
        }
    }

    /// Restrict the step to a single choice.
    pub fn single(mut self) -> Self {
        self.multi = false;
        self
    }

    /// Entities pre-marked as selected.
    pub fn picked(&self) -> impl Iterator<Item = &E> {
        self.items.iter().filter(|i| i.picked).map(|i| &i.entity)
    }

    /// Check a response against this step.
    ///
    /// A valid response is non-empty, has no duplicates, only names offered
    /// entities, and has exactly one entry for single-select steps.
    pub fn accepts(&self, chosen: &[E]) -> bool {
        if chosen.is_empty() || (!self.multi && chosen.len() != 1) {
            return false;
        }

        chosen.iter().enumerate().all(|(i, entity)| {
            let offered = self.items.iter().any(|item| item.entity.id() == entity.id());
            let duplicate = chosen[..i].iter().any(|prev| prev.id() == entity.id());
            offered && !duplicate
        })
    }

    /// The offered entities a response names, in the order chosen.
    ///
    /// Returns `None` unless [`PickStep::accepts`] holds. The caller's copies
    /// are only used for their ids.
    pub fn resolve(&self, chosen: &[E]) -> Option<Vec<E>> {
        if !self.accepts(chosen) {
            return None;
        }

        chosen
            .iter()
            .map(|wanted| {
                self.items
                    .iter()
                    .find(|item| item.entity.id() == wanted.id())
                    .map(|item| item.entity.clone())
            })
            .collect()
    }
}

/// What choosing a confirm item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction<F> {
    /// Proceed with these flags.
    Proceed(Vec<F>),
    /// Terminate the wizard without executing.
    Cancel,
}

/// One mutually exclusive choice in a confirm step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmItem<F> {
    /// Primary display text
    pub label: String,
    /// Short annotation (e.g. the flag it adds)
    pub description: Option<String>,
    /// Longer explanation of what happens
    pub detail: Option<String>,
    /// Payload returned when chosen
    pub action: ConfirmAction<F>,
}

impl<F> ConfirmItem<F> {
    /// An item that proceeds with `flags`.
    pub fn proceed(label: impl Into<String>, flags: Vec<F>) -> Self {
        Self {
            label: label.into(),
            description: None,
            detail: None,
            action: ConfirmAction::Proceed(flags),
        }
    }

    /// The cancel directive.
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            detail: None,
            action: ConfirmAction::Cancel,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether this item is the cancel directive.
    pub fn is_cancel(&self) -> bool {
        matches!(self.action, ConfirmAction::Cancel)
    }
}

/// A step choosing one of a small fixed set of actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmStep<F> {
    /// Title shown above the choices
    pub title: String,
    /// Choices, in display order
    pub items: Vec<ConfirmItem<F>>,
}

impl<F: PartialEq> ConfirmStep<F> {
    /// Build a confirm step.
    pub fn new(title: impl Into<String>, items: Vec<ConfirmItem<F>>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// A step whose only choice is the cancel directive.
    pub fn cancel_only(title: impl Into<String>, item: ConfirmItem<F>) -> Self {
        let item = ConfirmItem {
            action: ConfirmAction::Cancel,
            ..item
        };
        Self::new(title, vec![item])
    }

    /// Whether `item` is one of this step's choices.
    pub fn offers(&self, item: &ConfirmItem<F>) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Whether every choice is the cancel directive.
    pub fn is_cancel_only(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(ConfirmItem::is_cancel)
    }
}

/// The response to a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<E, F> {
    /// Entities chosen at a pick step.
    Entities(Vec<E>),
    /// Item chosen at a confirm step.
    Choice(ConfirmItem<F>),
    /// The user asked to go back (or dismissed the step).
    Back,
}
