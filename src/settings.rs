use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{inference::ForestConfig, log_warn};

const ENABLE_LOGS: bool = true;

pub const DEFAULT_DATA_PATH: &str = "data/observations.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub data_path: PathBuf,
    #[serde(flatten)]
    pub forest: ForestConfig,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            forest: ForestConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_probabilities: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub model: ModelSettings,
    pub display: DisplaySettings,
}

/// JSON-backed settings. A missing file means defaults; an unreadable one
/// is logged and replaced by defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: UserSettings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring malformed settings at {}: {}",
                    path.display(),
                    err
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &UserSettings {
        &self.data
    }

    pub fn model(&self) -> &ModelSettings {
        &self.data.model
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.data.display
    }

    pub fn update_model(&mut self, model: ModelSettings) -> Result<()> {
        self.data.model = model;
        self.persist()
    }

    pub fn update_display(&mut self, display: DisplaySettings) -> Result<()> {
        self.data.display = display;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&mut self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        self.data = serde_json::from_str(&contents)?;
        Ok(())
    }
}
