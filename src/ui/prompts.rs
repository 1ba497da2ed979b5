//! ui::prompts
//!
//! Interactive prompts for wizard steps.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode
//! any step that reaches the terminal fails with
//! [`PromptError::NotInteractive`], so commands must be fully pre-answered
//! to run unattended. Dismissing a prompt (Esc or q) answers
//! [`Selection::Back`].

use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};

use crate::wizard::{
    Candidate, ConfirmItem, ConfirmStep, PickStep, PromptError, Prompter, Selection, Step,
};

fn io_error(err: dialoguer::Error) -> PromptError {
    PromptError::IoError(err.to_string())
}

/// Prompter backed by `dialoguer`.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive,
        }
    }

    fn pick<E: Candidate, F>(&self, step: &PickStep<E>) -> Result<Selection<E, F>, PromptError> {
        let labels: Vec<String> = step.items.iter().map(|i| pick_label(&i.entity)).collect();

        let chosen = if step.multi {
            let defaults: Vec<bool> = step.items.iter().map(|i| i.picked).collect();
            MultiSelect::with_theme(&self.theme)
                .with_prompt(format!("{} ({})", step.title, step.placeholder))
                .items(&labels)
                .defaults(&defaults)
                .interact_opt()
                .map_err(io_error)?
        } else {
            let default = step.items.iter().position(|i| i.picked).unwrap_or(0);
            Select::with_theme(&self.theme)
                .with_prompt(format!("{} ({})", step.title, step.placeholder))
                .items(&labels)
                .default(default)
                .interact_opt()
                .map_err(io_error)?
                .map(|index| vec![index])
        };

        Ok(match chosen {
            Some(indices) if !indices.is_empty() => Selection::Entities(
                indices
                    .into_iter()
                    .map(|i| step.items[i].entity.clone())
                    .collect(),
            ),
            _ => Selection::Back,
        })
    }

    fn confirm<E, F: Clone>(&self, step: &ConfirmStep<F>) -> Result<Selection<E, F>, PromptError> {
        let labels: Vec<String> = step.items.iter().map(confirm_label).collect();

        let chosen = Select::with_theme(&self.theme)
            .with_prompt(&step.title)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(io_error)?;

        Ok(match chosen {
            Some(index) => Selection::Choice(step.items[index].clone()),
            None => Selection::Back,
        })
    }
}

impl<E: Candidate, F: Clone> Prompter<E, F> for TerminalPrompter {
    fn prompt(&mut self, step: &Step<E, F>) -> Result<Selection<E, F>, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        match step {
            Step::Pick(pick) => self.pick(pick),
            Step::Confirm(confirm) => self.confirm(confirm),
        }
    }
}

fn pick_label<E: Candidate>(entity: &E) -> String {
    match entity.description() {
        Some(description) => format!("{}  {}", entity.label(), description),
        None => entity.label(),
    }
}

fn confirm_label<F>(item: &ConfirmItem<F>) -> String {
    let mut label = item.label.clone();
    if let Some(description) = &item.description {
        label.push_str(&format!("  {}", description));
    }
    if let Some(detail) = &item.detail {
        label.push_str(&format!("\n    {}", detail));
    }
    label
}
