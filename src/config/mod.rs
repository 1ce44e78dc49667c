// Endpoint and credential settings
//
// Stored in ~/.dynaform/config.toml. The access token authenticates the
// field-generation endpoint; the sentiment endpoint is unauthenticated.

use crate::file_storage::get_global_data_dir;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_sentiment_url() -> String {
    "http://127.0.0.1:8090/functions/v1/analyze-sentiment".to_string()
}

fn default_generate_url() -> String {
    "http://127.0.0.1:8090/functions/v1/generate-form-fields".to_string()
}

/// Settings loaded from ~/.dynaform/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Sentiment scoring endpoint URL
    #[serde(default = "default_sentiment_url")]
    pub sentiment_url: String,
    /// AI field-generation endpoint URL
    #[serde(default = "default_generate_url")]
    pub generate_url: String,
    /// Bearer token for the generation endpoint
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sentiment_url: default_sentiment_url(),
            generate_url: default_generate_url(),
            access_token: None,
        }
    }
}

impl Settings {
    /// Get the settings file path (~/.dynaform/config.toml)
    pub fn get_settings_path() -> PathBuf {
        get_global_data_dir().join("config.toml")
    }

    /// Load settings from disk; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read settings file '{}': {}", path.display(), e))?;

        let settings: Settings = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse settings file '{}': {}", path.display(), e))?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow!(
                        "Failed to create settings directory '{}': {}",
                        parent.display(),
                        e
                    )
                })?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize settings: {}", e))?;

        fs::write(path, contents)
            .map_err(|e| anyhow!("Failed to write settings file '{}': {}", path.display(), e))?;

        Ok(())
    }
}
