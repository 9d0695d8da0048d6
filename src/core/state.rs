use crate::core::extension::QExtension;
use std::path::PathBuf;

/// Why a wizard run stopped before its last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interrupted {
    pub reason: String,
}

/// Input accumulated by every wizard, whatever it produces.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub total_steps: usize,
    /// Selected extensions, unique by artifact id, in selection order.
    pub extensions: Vec<QExtension>,
    pub wizard_interrupted: Option<Interrupted>,
}

impl State {
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            ..Default::default()
        }
    }

    pub fn is_selected(&self, extension: &QExtension) -> bool {
        self.extensions
            .iter()
            .any(|e| e.artifact_id == extension.artifact_id)
    }

    /// Select an unselected extension or deselect a selected one.
    pub fn toggle_extension(&mut self, extension: &QExtension) {
        if let Some(pos) = self
            .extensions
            .iter()
            .position(|e| e.artifact_id == extension.artifact_id)
        {
            self.extensions.remove(pos);
        } else {
            self.extensions.push(extension.clone());
        }
    }

    pub fn interrupt<S: Into<String>>(&mut self, reason: S) {
        self.wizard_interrupted = Some(Interrupted {
            reason: reason.into(),
        });
    }
}

/// Access to the shared part of any wizard's state.
pub trait WizardState: Send {
    fn common(&self) -> &State;

    fn common_mut(&mut self) -> &mut State;
}

impl WizardState for State {
    fn common(&self) -> &State {
        self
    }

    fn common_mut(&mut self) -> &mut State {
        self
    }
}

/// Everything needed to request a generated project.
#[derive(Debug, Clone, Default)]
pub struct ProjectGenState {
    pub state: State,
    pub group_id: String,
    pub artifact_id: String,
    pub project_version: String,
    pub package_name: String,
    pub resource_name: String,
    pub target_dir: PathBuf,
}

impl ProjectGenState {
    pub fn new(total_steps: usize) -> Self {
        Self {
            state: State::new(total_steps),
            ..Default::default()
        }
    }

    /// Directory the generated project is unpacked into.
    pub fn project_dir(&self) -> PathBuf {
        self.target_dir.join(&self.artifact_id)
    }
}

impl WizardState for ProjectGenState {
    fn common(&self) -> &State {
        &self.state
    }

    fn common_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

/// Input for adding extensions to an existing Maven project.
#[derive(Debug, Clone, Default)]
pub struct AddExtensionsState {
    pub state: State,
    pub pom_path: PathBuf,
}

impl AddExtensionsState {
    pub fn new(total_steps: usize, pom_path: PathBuf) -> Self {
        Self {
            state: State::new(total_steps),
            pom_path,
        }
    }
}

impl WizardState for AddExtensionsState {
    fn common(&self) -> &State {
        &self.state
    }

    fn common_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(artifact_id: &str) -> QExtension {
        QExtension {
            name: artifact_id.to_string(),
            group_id: "io.quarkus".to_string(),
            artifact_id: artifact_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_keeps_selection_order() {
        let mut state = State::new(7);
        state.toggle_extension(&ext("quarkus-resteasy"));
        state.toggle_extension(&ext("quarkus-arc"));
        state.toggle_extension(&ext("quarkus-kafka"));
        state.toggle_extension(&ext("quarkus-arc"));

        let ids: Vec<_> = state.extensions.iter().map(|e| e.artifact_id.as_str()).collect();
        assert_eq!(ids, vec!["quarkus-resteasy", "quarkus-kafka"]);
        assert!(!state.is_selected(&ext("quarkus-arc")));
    }

    #[test]
    fn test_interrupt_records_reason() {
        let mut state = State::new(1);
        state.interrupt("user cancelled");
        assert_eq!(
            state.wizard_interrupted,
            Some(Interrupted {
                reason: "user cancelled".to_string()
            })
        );
    }
}
