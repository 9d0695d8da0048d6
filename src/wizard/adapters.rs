//! Single-interaction prompts shown through the flow controller.

use super::prompt::{InputBoxView, InputEvent, PickItem, PickItemView, QuickInputButton, QuickPickView, StepDisplay};
use super::MultiStepInput;
use crate::error::{Result, WizardError};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;

/// Asynchronous check of a candidate value; `Some(message)` rejects it.
pub type Validator = Arc<dyn Fn(String) -> BoxFuture<'static, Option<String>> + Send + Sync>;

pub fn validator<F, Fut>(f: F) -> Validator
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<String>> + Send + 'static,
{
    Arc::new(move |value| Box::pin(f(value)))
}

pub fn sync_validator<F>(f: F) -> Validator
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(move |value| {
        let message = f(&value);
        Box::pin(async move { message })
    })
}

/// What a prompt resolved to: the requested value or one of the extra buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Value(T),
    Button(QuickInputButton),
}

pub struct QuickPickParameters<T> {
    pub title: String,
    pub step: Option<usize>,
    pub total_steps: Option<usize>,
    pub items: Vec<T>,
    pub active_item: Option<usize>,
    pub placeholder: Option<String>,
    pub buttons: Vec<QuickInputButton>,
}

pub struct InputBoxParameters {
    pub title: String,
    pub step: Option<usize>,
    pub total_steps: Option<usize>,
    pub value: String,
    pub prompt: String,
    pub validate: Validator,
    pub buttons: Vec<QuickInputButton>,
}

fn step_display(step: Option<usize>, total_steps: Option<usize>) -> StepDisplay {
    match (step, total_steps) {
        (Some(step), Some(total)) => Some((step, total)),
        _ => None,
    }
}

impl MultiStepInput {
    fn buttons_with_back(&self, extra: Vec<QuickInputButton>) -> Vec<QuickInputButton> {
        let mut buttons = Vec::with_capacity(extra.len() + 1);
        if self.step_number() > 1 {
            buttons.push(QuickInputButton::back());
        }
        buttons.extend(extra);
        buttons
    }

    /// Show a choice prompt and wait for a pick, an extra button, back or cancel.
    pub async fn show_quick_pick<T: PickItem + Send>(
        &mut self,
        params: QuickPickParameters<T>,
    ) -> Result<PromptResult<T>> {
        let QuickPickParameters {
            title,
            step,
            total_steps,
            mut items,
            active_item,
            placeholder,
            buttons,
        } = params;

        let view = QuickPickView {
            title,
            step: step_display(step, total_steps),
            items: items.iter().map(PickItemView::of).collect(),
            active_item,
            placeholder,
            buttons: self.buttons_with_back(buttons),
        };
        let handle = self.backend.create_quick_pick(view)?;
        self.install(handle)?;

        loop {
            match self.active()?.next_event().await? {
                InputEvent::Selected(index) if index < items.len() => {
                    return Ok(PromptResult::Value(items.swap_remove(index)));
                }
                InputEvent::ButtonTriggered(button) if button.is_back() => {
                    return Err(WizardError::Back);
                }
                InputEvent::ButtonTriggered(button) => return Ok(PromptResult::Button(button)),
                InputEvent::Hidden => return Err(WizardError::Cancel),
                event => tracing::trace!(?event, "Ignoring event on choice prompt"),
            }
        }
    }

    /// Show a text prompt and wait for an accepted value, an extra button, back or cancel.
    ///
    /// Validation runs on every change. Only the most recently started
    /// validation may update the message; results of superseded ones are dropped.
    pub async fn show_input_box(&mut self, params: InputBoxParameters) -> Result<PromptResult<String>> {
        let InputBoxParameters {
            title,
            step,
            total_steps,
            value,
            prompt,
            validate,
            buttons,
        } = params;

        let view = InputBoxView {
            title,
            step: step_display(step, total_steps),
            value,
            prompt,
            buttons: self.buttons_with_back(buttons),
        };
        let handle = self.backend.create_input_box(view)?;
        self.install(handle)?;

        let mut pending: FuturesUnordered<BoxFuture<'static, (u64, Option<String>)>> =
            FuturesUnordered::new();
        let mut latest: u64 = 0;

        loop {
            let input = self.active()?;

            let event = tokio::select! {
                event = input.next_event() => event?,
                Some((sequence, message)) = pending.next(), if !pending.is_empty() => {
                    if sequence == latest {
                        input.set_validation_message(message);
                    } else {
                        tracing::trace!(sequence, latest, "Discarding stale validation");
                    }
                    continue;
                }
            };

            match event {
                InputEvent::ValueChanged(text) => {
                    latest += 1;
                    let sequence = latest;
                    let check = validate(text);
                    pending.push(Box::pin(async move { (sequence, check.await) }));
                }
                InputEvent::Accepted(text) => {
                    // Anything still in flight describes an older value
                    latest += 1;

                    input.set_enabled(false);
                    input.set_busy(true);
                    match validate(text.clone()).await {
                        None => return Ok(PromptResult::Value(text)),
                        Some(message) => input.set_validation_message(Some(message)),
                    }
                    input.set_enabled(true);
                    input.set_busy(false);
                }
                InputEvent::ButtonTriggered(button) if button.is_back() => {
                    return Err(WizardError::Back);
                }
                InputEvent::ButtonTriggered(button) => return Ok(PromptResult::Button(button)),
                InputEvent::Hidden => return Err(WizardError::Cancel),
                InputEvent::Selected(_) => {}
            }
        }
    }
}
