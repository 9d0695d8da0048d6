//! `generate`: collect project coordinates, pick extensions, download and unpack.

use crate::commands::pick_extensions::{ExtensionCatalog, PickExtensions};
use crate::core::api::QuarkusApi;
use crate::core::config::{Config, ProjectDefaults};
use crate::core::download::download_project;
use crate::core::state::ProjectGenState;
use crate::error::{Result, WizardError};
use crate::utils::validation;
use crate::wizard::prompt::PromptBackend;
use crate::wizard::{
    next, sync_validator, InputBoxParameters, MultiStepInput, PromptResult, Step, StepRef,
    Validator,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub const TOTAL_STEPS: usize = 7;

/// Everything the steps share for one run.
pub struct GenerateContext {
    pub defaults: ProjectDefaults,
    pub catalog: Arc<ExtensionCatalog>,
    /// Pre-filled answer for the target directory.
    pub working_dir: PathBuf,
}

pub async fn generate_project(config: &Config, backend: Box<dyn PromptBackend>) -> Result<Option<PathBuf>> {
    let api = QuarkusApi::new(config)?;
    let context = Arc::new(GenerateContext {
        defaults: config.defaults.clone(),
        catalog: Arc::new(ExtensionCatalog::new(api)),
        working_dir: std::env::current_dir()?,
    });

    let state = run_wizard(context.clone(), backend).await?;
    if let Some(interrupted) = &state.state.wizard_interrupted {
        println!("⚠️  {}", interrupted.reason);
        println!("No project was generated.");
        return Ok(None);
    }

    println!(
        "📦 Generating {}:{}:{} with {} extension(s)",
        state.group_id,
        state.artifact_id,
        state.project_version,
        state.state.extensions.len()
    );

    let summary = download_project(context.catalog.api(), &state).await?;
    let project_dir = state.project_dir();
    tracing::debug!(
        files = summary.files,
        directories = summary.directories,
        bytes = summary.bytes_written,
        "Project extracted"
    );

    println!("✅ Project created in {}", project_dir.display());
    println!();
    println!("To start developing, run:");
    println!("  cd {}", project_dir.display());
    println!("  ./mvnw quarkus:dev");

    Ok(Some(project_dir))
}

/// Run the seven prompts and return what was collected.
pub async fn run_wizard(context: Arc<GenerateContext>, backend: Box<dyn PromptBackend>) -> Result<ProjectGenState> {
    let mut state = ProjectGenState::new(TOTAL_STEPS);
    let start: StepRef<ProjectGenState> = Arc::new(GroupIdStep { context });
    MultiStepInput::run(backend, start, &mut state).await?;
    Ok(state)
}

/// The current answer when the step is revisited, otherwise the default.
fn prefill(current: &str, default: &str) -> String {
    if current.is_empty() {
        default.to_string()
    } else {
        current.to_string()
    }
}

async fn ask(
    input: &mut MultiStepInput,
    state: &ProjectGenState,
    title: &str,
    prompt: &str,
    value: String,
    validate: Validator,
) -> Result<String> {
    let result = input
        .show_input_box(InputBoxParameters {
            title: title.to_string(),
            step: Some(input.step_number()),
            total_steps: Some(state.state.total_steps),
            value,
            prompt: prompt.to_string(),
            validate,
            buttons: Vec::new(),
        })
        .await?;

    match result {
        PromptResult::Value(value) => Ok(value),
        PromptResult::Button(button) => Err(WizardError::prompt_error(format!(
            "unexpected button '{}'",
            button.id
        ))),
    }
}

struct GroupIdStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for GroupIdStep {
    fn name(&self) -> &'static str {
        "group-id"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        let value = prefill(&state.group_id, &self.context.defaults.group_id);
        state.group_id = ask(
            input,
            state,
            "Quarkus Tools",
            "Your project groupId",
            value,
            sync_validator(validation::validate_group_id),
        )
        .await?;

        next(ArtifactIdStep {
            context: self.context.clone(),
        })
    }
}

struct ArtifactIdStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for ArtifactIdStep {
    fn name(&self) -> &'static str {
        "artifact-id"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        let value = prefill(&state.artifact_id, &self.context.defaults.artifact_id);
        state.artifact_id = ask(
            input,
            state,
            "Quarkus Tools",
            "Your project artifactId",
            value,
            sync_validator(validation::validate_artifact_id),
        )
        .await?;

        next(ProjectVersionStep {
            context: self.context.clone(),
        })
    }
}

struct ProjectVersionStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for ProjectVersionStep {
    fn name(&self) -> &'static str {
        "project-version"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        let value = prefill(&state.project_version, &self.context.defaults.project_version);
        state.project_version = ask(
            input,
            state,
            "Quarkus Tools",
            "Your project version",
            value,
            sync_validator(validation::validate_version),
        )
        .await?;

        next(PackageNameStep {
            context: self.context.clone(),
        })
    }
}

struct PackageNameStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for PackageNameStep {
    fn name(&self) -> &'static str {
        "package-name"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        // Follow the group id unless the user already answered
        let default = if state.group_id.is_empty() {
            self.context.defaults.package_name.clone()
        } else {
            state.group_id.clone()
        };
        let value = prefill(&state.package_name, &default);
        state.package_name = ask(
            input,
            state,
            "Quarkus Tools",
            "Your package name",
            value,
            sync_validator(validation::validate_package_name),
        )
        .await?;

        next(ResourceNameStep {
            context: self.context.clone(),
        })
    }
}

struct ResourceNameStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for ResourceNameStep {
    fn name(&self) -> &'static str {
        "resource-name"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        let value = prefill(&state.resource_name, &self.context.defaults.resource_name);
        state.resource_name = ask(
            input,
            state,
            "Quarkus Tools",
            "Your resource name",
            value,
            sync_validator(validation::validate_resource_name),
        )
        .await?;

        let target: StepRef<ProjectGenState> = Arc::new(TargetDirStep {
            context: self.context.clone(),
        });
        next(PickExtensions::new(self.context.catalog.clone(), Some(target)))
    }
}

struct TargetDirStep {
    context: Arc<GenerateContext>,
}

#[async_trait]
impl Step<ProjectGenState> for TargetDirStep {
    fn name(&self) -> &'static str {
        "target-dir"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut ProjectGenState) -> Result<Option<StepRef<ProjectGenState>>> {
        let current = state.target_dir.to_string_lossy().into_owned();
        let value = prefill(&current, &self.context.working_dir.to_string_lossy());
        let artifact_id = state.artifact_id.clone();

        let answer = ask(
            input,
            state,
            "Quarkus Tools",
            "Directory to generate the project in",
            value,
            sync_validator(move |dir| validation::validate_target_dir(dir, &artifact_id)),
        )
        .await?;
        state.target_dir = PathBuf::from(answer);

        Ok(None)
    }
}
