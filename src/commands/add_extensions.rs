//! `add-extensions`: pick extensions and add them to an existing Maven project.

use crate::commands::pick_extensions::{ExtensionCatalog, PickExtensions};
use crate::core::api::QuarkusApi;
use crate::core::config::Config;
use crate::core::extension::QExtension;
use crate::core::state::AddExtensionsState;
use crate::error::{Result, WizardError};
use crate::utils::fs;
use crate::wizard::prompt::PromptBackend;
use crate::wizard::{MultiStepInput, StepRef};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

pub const TOTAL_STEPS: usize = 1;
const POM_FILE: &str = "pom.xml";

pub async fn add_extensions(
    config: &Config,
    pom: Option<PathBuf>,
    backend: Box<dyn PromptBackend>,
) -> Result<()> {
    let pom_path = resolve_pom(pom, &std::env::current_dir()?)?;
    tracing::debug!("Using {}", pom_path.display());

    let catalog = Arc::new(ExtensionCatalog::new(QuarkusApi::new(config)?));
    let state = run_wizard(catalog, pom_path, backend).await?;

    if let Some(interrupted) = &state.state.wizard_interrupted {
        println!("⚠️  {}", interrupted.reason);
        println!("No extensions were added.");
        return Ok(());
    }

    if state.state.extensions.is_empty() {
        println!("No extensions selected.");
        return Ok(());
    }

    let project_dir = project_dir(&state.pom_path);
    let (program, args) = maven_command(&project_dir, &state.state.extensions);
    println!("🔧 Running {} {}", program.display(), args.join(" "));

    let status = Command::new(&program)
        .args(&args)
        .current_dir(&project_dir)
        .status()
        .await
        .map_err(|e| WizardError::maven_error(format!("failed to run {}: {e}", program.display())))?;

    if !status.success() {
        return Err(WizardError::maven_error(format!(
            "{} exited with {status}",
            program.display()
        )));
    }

    println!("✅ Added {} extension(s)", state.state.extensions.len());
    Ok(())
}

pub async fn run_wizard(
    catalog: Arc<ExtensionCatalog>,
    pom_path: PathBuf,
    backend: Box<dyn PromptBackend>,
) -> Result<AddExtensionsState> {
    let mut state = AddExtensionsState::new(TOTAL_STEPS, pom_path);
    let start: StepRef<AddExtensionsState> = Arc::new(PickExtensions::new(catalog, None));
    MultiStepInput::run(backend, start, &mut state).await?;
    Ok(state)
}

/// Accept either a `pom.xml` or the directory holding one; default to `cwd`.
pub fn resolve_pom(pom: Option<PathBuf>, cwd: &Path) -> Result<PathBuf> {
    let candidate = match pom {
        Some(path) if path.is_dir() => path.join(POM_FILE),
        Some(path) => path,
        None => cwd.join(POM_FILE),
    };

    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(WizardError::PomNotFound { path: candidate })
    }
}

fn project_dir(pom_path: &Path) -> PathBuf {
    match pom_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The project's Maven wrapper if it has one, otherwise `mvn` from `PATH`.
pub fn maven_command(project_dir: &Path, extensions: &[QExtension]) -> (PathBuf, Vec<String>) {
    let wrapper = project_dir.join(if cfg!(windows) { "mvnw.cmd" } else { "mvnw" });
    let program = if fs::is_executable(&wrapper) {
        wrapper
    } else {
        PathBuf::from("mvn")
    };

    let coordinates: Vec<String> = extensions.iter().map(QExtension::coordinates).collect();
    let args = vec![
        "quarkus:add-extension".to_string(),
        format!("-Dextensions={}", coordinates.join(",")),
    ];

    (program, args)
}
