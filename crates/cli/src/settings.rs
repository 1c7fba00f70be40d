use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use notescribe_core::shared::constants::{DEFAULT_WHISPER_BINARY, DEFAULT_WHISPER_MODEL};
use notescribe_core::transcription::domain::transcription_config::TranscriptionConfig;

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub whisper_model: String,
    /// `None` looks the `whisper` binary up on `PATH`.
    #[serde(default)]
    pub whisper_binary_path: Option<PathBuf>,
    /// `None` uses the system temp directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_model() -> String {
    DEFAULT_WHISPER_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whisper_model: default_model(),
            whisper_binary_path: None,
            output_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("notescribe").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn transcription_config(&self) -> TranscriptionConfig {
        TranscriptionConfig {
            model_name: self.whisper_model.clone(),
            binary_path: self
                .whisper_binary_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WHISPER_BINARY)),
            output_dir: self.output_dir.clone().unwrap_or_else(std::env::temp_dir),
        }
    }
}
