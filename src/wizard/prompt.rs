//! The boundary between the flow engine and whatever renders prompts.
//!
//! A [`PromptBackend`] creates one [`QuickInput`] per interaction; the flow
//! controller owns the handle while it is displayed and reads user actions
//! from it as [`InputEvent`]s.

use crate::error::Result;
use async_trait::async_trait;

/// A button shown alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuickInputButton {
    pub id: String,
    pub tooltip: Option<String>,
}

impl QuickInputButton {
    pub const BACK_ID: &'static str = "back";

    pub fn new<S: Into<String>>(id: S, tooltip: Option<String>) -> Self {
        Self {
            id: id.into(),
            tooltip,
        }
    }

    /// The built-in navigation button, offered whenever there is a step to return to.
    pub fn back() -> Self {
        Self::new(Self::BACK_ID, Some("Back".to_string()))
    }

    pub fn is_back(&self) -> bool {
        self.id == Self::BACK_ID
    }

    pub fn caption(&self) -> &str {
        self.tooltip.as_deref().unwrap_or(&self.id)
    }
}

/// Something that can be listed in a choice prompt.
pub trait PickItem {
    fn label(&self) -> String;

    fn description(&self) -> Option<String> {
        None
    }

    fn detail(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItemView {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl PickItemView {
    pub fn of<T: PickItem>(item: &T) -> Self {
        Self {
            label: item.label(),
            description: item.description(),
            detail: item.detail(),
        }
    }
}

/// `(step, total_steps)`, present only when both numbers are known.
pub type StepDisplay = Option<(usize, usize)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickView {
    pub title: String,
    pub step: StepDisplay,
    pub items: Vec<PickItemView>,
    pub active_item: Option<usize>,
    pub placeholder: Option<String>,
    pub buttons: Vec<QuickInputButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBoxView {
    pub title: String,
    pub step: StepDisplay,
    pub value: String,
    pub prompt: String,
    pub buttons: Vec<QuickInputButton>,
}

/// A user action on the displayed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// An item of a choice prompt was picked, by index.
    Selected(usize),
    ButtonTriggered(QuickInputButton),
    /// The text of an input box changed.
    ValueChanged(String),
    /// The input box was submitted with this text.
    Accepted(String),
    /// The prompt was dismissed without an answer.
    Hidden,
}

/// The single interaction surface currently on screen.
#[async_trait]
pub trait QuickInput: Send {
    fn show(&mut self) -> Result<()>;

    fn set_enabled(&mut self, enabled: bool);

    fn set_busy(&mut self, busy: bool);

    fn set_validation_message(&mut self, message: Option<String>);

    /// Wait for the next user action.
    ///
    /// Must be cancel-safe: dropping the future before it resolves may not lose an event.
    async fn next_event(&mut self) -> Result<InputEvent>;

    fn dispose(&mut self);
}

pub trait PromptBackend: Send {
    fn create_quick_pick(&mut self, view: QuickPickView) -> Result<Box<dyn QuickInput>>;

    fn create_input_box(&mut self, view: InputBoxView) -> Result<Box<dyn QuickInput>>;
}
