//! Multi-step input flow.
//!
//! A wizard is a chain of [`Step`]s. Each step shows prompts through the
//! [`MultiStepInput`] it is handed and returns the step to run next, or `None`
//! when the chain is finished.
//!
//! Going back and cancelling are not return values. A step (or any prompt it
//! awaits) raises [`WizardError::Back`] or [`WizardError::Cancel`] and `?`
//! carries the signal out to [`MultiStepInput::run`], which is the only place
//! that interprets them:
//!
//! - `Back` re-runs the step before the one that raised it.
//! - `Cancel` stops the chain. The run still returns `Ok(())`; the state's
//!   `wizard_interrupted` marker records why.

pub mod adapters;
pub mod prompt;
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

use crate::core::state::WizardState;
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use prompt::{PromptBackend, QuickInput};
use std::sync::Arc;

pub use adapters::{
    sync_validator, validator, InputBoxParameters, PromptResult, QuickPickParameters, Validator,
};

pub type StepRef<S> = Arc<dyn Step<S>>;

/// One unit of wizard navigation.
///
/// Steps can be re-entered when the user navigates back, so `run` must not
/// assume it executes only once per wizard.
#[async_trait]
pub trait Step<S: WizardState>: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut S) -> Result<Option<StepRef<S>>>;
}

/// Wrap a step for returning from [`Step::run`].
pub fn next<S: WizardState, T: Step<S> + 'static>(step: T) -> Result<Option<StepRef<S>>> {
    Ok(Some(Arc::new(step)))
}

pub struct MultiStepInput {
    backend: Box<dyn PromptBackend>,
    current: Option<Box<dyn QuickInput>>,
    depth: usize,
}

impl MultiStepInput {
    /// Run a wizard from `start` until a step returns `None` or the user cancels.
    pub async fn run<S: WizardState>(
        backend: Box<dyn PromptBackend>,
        start: StepRef<S>,
        state: &mut S,
    ) -> Result<()> {
        let mut input = MultiStepInput::new(backend);
        let result = input.step_through(start, state).await;
        input.dispose_current();
        result
    }

    fn new(backend: Box<dyn PromptBackend>) -> Self {
        Self {
            backend,
            current: None,
            depth: 0,
        }
    }

    /// Number of steps on the stack, including the one running now.
    pub fn step_number(&self) -> usize {
        self.depth
    }

    async fn step_through<S: WizardState>(&mut self, start: StepRef<S>, state: &mut S) -> Result<()> {
        let mut steps: Vec<StepRef<S>> = Vec::new();
        let mut step = Some(start);

        while let Some(current) = step.take() {
            steps.push(current.clone());
            self.depth = steps.len();

            if let Some(active) = self.current.as_mut() {
                active.set_enabled(false);
                active.set_busy(true);
            }

            tracing::debug!(step = current.name(), depth = self.depth, "Running wizard step");

            match current.run(self, state).await {
                Ok(next) => step = next,
                Err(WizardError::Back) => {
                    steps.pop();
                    step = steps.pop();
                    if step.is_none() {
                        return Err(WizardError::NoPreviousStep);
                    }
                    tracing::debug!(depth = steps.len() + 1, "Going back");
                }
                Err(WizardError::Cancel) => {
                    tracing::debug!(step = current.name(), "Wizard cancelled");
                    let common = state.common_mut();
                    if common.wizard_interrupted.is_none() {
                        common.interrupt("Wizard cancelled");
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Replace the active prompt, disposing the old one before the new one is shown.
    fn install(&mut self, mut handle: Box<dyn QuickInput>) -> Result<()> {
        self.dispose_current();
        handle.show()?;
        self.current = Some(handle);
        Ok(())
    }

    fn active(&mut self) -> Result<&mut Box<dyn QuickInput>> {
        self.current
            .as_mut()
            .ok_or_else(|| WizardError::prompt_error("no prompt is displayed"))
    }

    fn dispose_current(&mut self) {
        if let Some(mut previous) = self.current.take() {
            previous.dispose();
        }
    }
}
