//! In-memory prompt backend driven by a queue of events.

use super::prompt::{InputBoxView, InputEvent, PromptBackend, QuickInput, QuickPickView};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Record {
    Created(usize),
    Shown(usize),
    Enabled(usize, bool),
    Busy(usize, bool),
    Message(usize, Option<String>),
    Disposed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum View {
    Pick(QuickPickView),
    Input(InputBoxView),
}

pub(crate) struct ScriptedBackend {
    next_id: usize,
    records: Arc<Mutex<Vec<Record>>>,
    views: Arc<Mutex<Vec<View>>>,
    events: Arc<tokio::sync::Mutex<UnboundedReceiver<InputEvent>>>,
}

/// The test's side of a [`ScriptedBackend`].
#[derive(Clone)]
pub(crate) struct Script {
    records: Arc<Mutex<Vec<Record>>>,
    views: Arc<Mutex<Vec<View>>>,
    events: UnboundedSender<InputEvent>,
}

impl Script {
    pub(crate) fn send(&self, event: InputEvent) {
        self.events.send(event).expect("backend dropped");
    }

    pub(crate) fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub(crate) fn views(&self) -> Vec<View> {
        self.views.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<Option<String>> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Message(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl ScriptedBackend {
    pub(crate) fn new() -> (Self, Script) {
        let (tx, rx) = unbounded_channel();
        let records = Arc::new(Mutex::new(Vec::new()));
        let views = Arc::new(Mutex::new(Vec::new()));

        let backend = Self {
            next_id: 0,
            records: records.clone(),
            views: views.clone(),
            events: Arc::new(tokio::sync::Mutex::new(rx)),
        };
        let script = Script {
            records,
            views,
            events: tx,
        };
        (backend, script)
    }

    fn create(&mut self, view: View) -> Box<dyn QuickInput> {
        let id = self.next_id;
        self.next_id += 1;
        self.views.lock().unwrap().push(view);
        self.records.lock().unwrap().push(Record::Created(id));

        Box::new(ScriptedInput {
            id,
            records: self.records.clone(),
            events: self.events.clone(),
        })
    }
}

impl PromptBackend for ScriptedBackend {
    fn create_quick_pick(&mut self, view: QuickPickView) -> Result<Box<dyn QuickInput>> {
        Ok(self.create(View::Pick(view)))
    }

    fn create_input_box(&mut self, view: InputBoxView) -> Result<Box<dyn QuickInput>> {
        Ok(self.create(View::Input(view)))
    }
}

struct ScriptedInput {
    id: usize,
    records: Arc<Mutex<Vec<Record>>>,
    events: Arc<tokio::sync::Mutex<UnboundedReceiver<InputEvent>>>,
}

impl ScriptedInput {
    fn record(&self, record: Record) {
        self.records.lock().unwrap().push(record);
    }
}

#[async_trait]
impl QuickInput for ScriptedInput {
    fn show(&mut self) -> Result<()> {
        self.record(Record::Shown(self.id));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.record(Record::Enabled(self.id, enabled));
    }

    fn set_busy(&mut self, busy: bool) {
        self.record(Record::Busy(self.id, busy));
    }

    fn set_validation_message(&mut self, message: Option<String>) {
        self.record(Record::Message(self.id, message));
    }

    async fn next_event(&mut self) -> Result<InputEvent> {
        let mut events = self.events.lock().await;
        events
            .recv()
            .await
            .ok_or_else(|| WizardError::prompt_error("event script exhausted"))
    }

    fn dispose(&mut self) {
        self.record(Record::Disposed(self.id));
    }
}
