use crate::error::{Result, WizardError};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://code.quarkus.io/api";
pub const API_URL_ENV: &str = "QUARKUS_WIZARD_API_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values pre-filled in the project wizard's text prompts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectDefaults {
    pub group_id: String,
    pub artifact_id: String,
    pub project_version: String,
    pub package_name: String,
    pub resource_name: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            group_id: "org.acme".to_string(),
            artifact_id: "quarkus-getting-started".to_string(),
            project_version: "1.0.0-SNAPSHOT".to_string(),
            package_name: "org.acme".to_string(),
            resource_name: "GreetingResource".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub defaults: ProjectDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            defaults: ProjectDefaults::default(),
        }
    }
}

impl Config {
    /// Load from the user config directory, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&get_config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            WizardError::config_error(format!("{}: {e}", path.display()))
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("quarkus-wizard"))
        .ok_or(WizardError::ConfigDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}
