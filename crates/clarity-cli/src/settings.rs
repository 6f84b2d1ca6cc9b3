//! User settings, stored as TOML.
//!
//! The default file lives in the platform config directory:
//! - Linux: ~/.config/clarity/settings.toml
//! - macOS: ~/Library/Application Support/dev.clarity.Clarity/settings.toml
//! - Windows: %APPDATA%/clarity/Clarity/config/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use clarity_ingest::{DEFAULT_MAX_UPLOAD_BYTES, DatasetStore};
use clarity_insight::{HistoryStore, LlmConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "clarity";
const APP_NAME: &str = "Clarity";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub history_dir: PathBuf,
    pub max_upload_bytes: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("storage/user_data"),
            history_dir: PathBuf::from("storage/history"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Rows shown in previews.
    pub sample_rows: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { sample_rows: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub llm: LlmConfig,
}

impl Settings {
    pub fn dataset_store(&self) -> DatasetStore {
        DatasetStore::new(&self.storage.data_dir, self.storage.max_upload_bytes)
    }

    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::new(&self.storage.history_dir)
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Default settings file, if the platform directory can be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from `explicit`, or from the default location.
///
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };
    load_from(&path)
}

fn load_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read settings file, using defaults");
            Settings::default()
        }
    }
}
