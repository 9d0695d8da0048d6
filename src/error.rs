use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WizardError>;

/// User-facing message for every network failure, whatever the cause.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Unable to download Quarkus project.";

#[derive(Error, Debug)]
pub enum WizardError {
    /// The user asked to return to the previous step.
    #[error("Navigated back to the previous step")]
    Back,

    /// The user abandoned the wizard.
    #[error("Wizard cancelled")]
    Cancel,

    #[error("Cannot go back: the first step has no previous step")]
    NoPreviousStep,

    #[error("{DOWNLOAD_FAILED_MESSAGE}")]
    DownloadFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Extraction failed: {path}")]
    ExtractionError { path: PathBuf },

    #[error("Prompt error: {message}")]
    PromptError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Config directory not found")]
    ConfigDirectoryNotFound,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("pom.xml not found: {path}")]
    PomNotFound { path: PathBuf },

    #[error("Maven command failed: {message}")]
    MavenError { message: String },
}

impl WizardError {
    /// True for the back/cancel signals, which are control flow rather than failures.
    pub fn is_navigation(&self) -> bool {
        matches!(self, WizardError::Back | WizardError::Cancel)
    }

    pub fn prompt_error<S: Into<String>>(message: S) -> Self {
        WizardError::PromptError {
            message: message.into(),
        }
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        WizardError::ConfigError {
            message: message.into(),
        }
    }

    pub fn maven_error<S: Into<String>>(message: S) -> Self {
        WizardError::MavenError {
            message: message.into(),
        }
    }
}

impl From<dialoguer::Error> for WizardError {
    fn from(error: dialoguer::Error) -> Self {
        WizardError::PromptError {
            message: error.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for WizardError {
    fn from(error: tokio::task::JoinError) -> Self {
        WizardError::PromptError {
            message: format!("background task failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_signals() {
        assert!(WizardError::Back.is_navigation());
        assert!(WizardError::Cancel.is_navigation());
        assert!(!WizardError::NoPreviousStep.is_navigation());
        assert!(!WizardError::DownloadFailed.is_navigation());
    }

    #[test]
    fn test_download_failure_is_opaque() {
        assert_eq!(
            WizardError::DownloadFailed.to_string(),
            "Unable to download Quarkus project."
        );
    }
}
