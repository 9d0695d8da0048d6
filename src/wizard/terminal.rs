//! Prompt backend for an interactive terminal, built on `dialoguer`.
//!
//! Choice prompts list their buttons after the items; Escape dismisses the
//! prompt. Text prompts accept `:back`, `:cancel` or `:<button id>` in place
//! of a value.

use super::prompt::{
    InputBoxView, InputEvent, PromptBackend, QuickInput, QuickInputButton, QuickPickView,
    StepDisplay,
};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct TerminalBackend;

impl TerminalBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PromptBackend for TerminalBackend {
    fn create_quick_pick(&mut self, view: QuickPickView) -> Result<Box<dyn QuickInput>> {
        Ok(Box::new(TerminalPrompt::new(Surface::Pick(view))))
    }

    fn create_input_box(&mut self, view: InputBoxView) -> Result<Box<dyn QuickInput>> {
        let value = view.value.clone();
        let mut prompt = TerminalPrompt::new(Surface::Input(view));
        prompt.value = value;
        Ok(Box::new(prompt))
    }
}

#[derive(Clone)]
enum Surface {
    Pick(QuickPickView),
    Input(InputBoxView),
}

struct TerminalPrompt {
    surface: Surface,
    value: String,
    validation_message: Option<String>,
    enabled: bool,
    disposed: bool,
    pending: Option<JoinHandle<Result<InputEvent>>>,
}

impl TerminalPrompt {
    fn new(surface: Surface) -> Self {
        Self {
            surface,
            value: String::new(),
            validation_message: None,
            enabled: true,
            disposed: false,
            pending: None,
        }
    }

    fn spawn_interaction(&self) -> JoinHandle<Result<InputEvent>> {
        let surface = self.surface.clone();
        let value = self.value.clone();
        let message = self.validation_message.clone();

        tokio::task::spawn_blocking(move || match surface {
            Surface::Pick(view) => pick(&view),
            Surface::Input(view) => input(&view, value, message),
        })
    }
}

#[async_trait]
impl QuickInput for TerminalPrompt {
    fn show(&mut self) -> Result<()> {
        if self.disposed {
            return Err(WizardError::prompt_error("prompt already disposed"));
        }
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_busy(&mut self, busy: bool) {
        tracing::trace!(busy, "Terminal prompt busy state");
    }

    fn set_validation_message(&mut self, message: Option<String>) {
        self.validation_message = message;
    }

    async fn next_event(&mut self) -> Result<InputEvent> {
        if self.disposed || !self.enabled {
            return Err(WizardError::prompt_error("prompt is not accepting input"));
        }

        if self.pending.is_none() {
            self.pending = Some(self.spawn_interaction());
        }

        let joined = match self.pending.as_mut() {
            Some(handle) => handle.await,
            None => return Err(WizardError::prompt_error("prompt interaction missing")),
        };
        self.pending = None;

        let event = joined??;
        if let InputEvent::Accepted(text) = &event {
            self.value = text.clone();
        }
        Ok(event)
    }

    fn dispose(&mut self) {
        self.disposed = true;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

fn header(title: &str, step: StepDisplay) -> String {
    match step {
        Some((step, total)) => format!("[{step}/{total}] {title}"),
        None => title.to_string(),
    }
}

fn pick(view: &QuickPickView) -> Result<InputEvent> {
    let mut prompt = header(&view.title, view.step);
    if let Some(placeholder) = &view.placeholder {
        prompt.push_str(&format!(" ({placeholder})"));
    }

    let mut entries: Vec<String> = view
        .items
        .iter()
        .map(|item| match &item.description {
            Some(description) => format!("{}  {}", item.label, description),
            None => item.label.clone(),
        })
        .collect();
    entries.extend(view.buttons.iter().map(button_entry));

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&entries)
        .default(view.active_item.unwrap_or(0).min(entries.len().saturating_sub(1)))
        .interact_opt()?;

    Ok(match selection {
        None => InputEvent::Hidden,
        Some(index) if index < view.items.len() => InputEvent::Selected(index),
        Some(index) => match view.buttons.get(index - view.items.len()) {
            Some(button) => InputEvent::ButtonTriggered(button.clone()),
            None => InputEvent::Hidden,
        },
    })
}

fn button_entry(button: &QuickInputButton) -> String {
    if button.is_back() {
        "← Back".to_string()
    } else {
        format!("[{}]", button.caption())
    }
}

fn input(view: &InputBoxView, value: String, message: Option<String>) -> Result<InputEvent> {
    if let Some(message) = message {
        eprintln!("  ✗ {message}");
    }

    let mut prompt = format!("{} - {}", header(&view.title, view.step), view.prompt);
    if !view.buttons.is_empty() {
        let commands: Vec<String> = view.buttons.iter().map(|b| format!(":{}", b.id)).collect();
        prompt.push_str(&format!(" [{} :cancel]", commands.join(" ")));
    }

    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(value)
        .allow_empty(true)
        .interact_text()?;

    Ok(parse_command(&text, &view.buttons).unwrap_or(InputEvent::Accepted(text)))
}

/// Map `:back`, `:cancel` and `:<button id>` to their events.
fn parse_command(text: &str, buttons: &[QuickInputButton]) -> Option<InputEvent> {
    let command = text.trim().strip_prefix(':')?;
    if command == "cancel" {
        return Some(InputEvent::Hidden);
    }

    buttons
        .iter()
        .find(|b| b.id == command)
        .map(|b| InputEvent::ButtonTriggered(b.clone()))
}
