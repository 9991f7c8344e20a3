//! Configuration management.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Compose file to read the service list from.
    pub compose_file: PathBuf,
    /// Project prefix used to derive runtime container names.
    /// Defaults to the compose file's parent directory name.
    pub project: Option<String>,
    /// Binary used for log streaming and `ps`.
    pub runtime_bin: String,
    /// Binary used for lifecycle commands.
    pub compose_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compose_file: PathBuf::from("docker-compose.yml"),
            project: None,
            runtime_bin: "docker".to_string(),
            compose_bin: "docker-compose".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from disk or create defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the config file exists but cannot be read or
    /// parsed, or when the default file cannot be written.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save()?;
            Ok(settings)
        }
    }

    /// Save settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the config directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// The project prefix: explicit setting, or the compose file's parent
    /// directory name the way compose derives it, or "convoy" when neither
    /// is available.
    #[must_use]
    pub fn project_prefix(&self) -> String {
        self.project
            .clone()
            .or_else(|| derive_project_name(&self.compose_file))
            .unwrap_or_else(|| "convoy".to_string())
    }

    fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "convoy")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .ok_or_else(|| Error::Config("could not determine config directory".into()))
    }
}

/// Lowercased alphanumeric form of the compose file's directory name.
fn derive_project_name(compose_file: &Path) -> Option<String> {
    let dir = compose_file
        .canonicalize()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .or_else(|| compose_file.parent().map(Path::to_path_buf))?;

    let name: String = dir
        .file_name()?
        .to_string_lossy()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();

    if name.is_empty() { None } else { Some(name) }
}
