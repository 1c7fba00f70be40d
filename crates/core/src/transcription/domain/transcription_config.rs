use std::path::PathBuf;

use crate::shared::constants::{DEFAULT_WHISPER_BINARY, DEFAULT_WHISPER_MODEL, KNOWN_WHISPER_MODELS};

/// Settings for one speech-to-text run.
///
/// `binary_path` may be a bare command name, in which case it is looked up
/// on `PATH`. `output_dir` is where the binary writes its transcript and
/// where the reader looks for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptionConfig {
    pub model_name: String,
    pub binary_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_WHISPER_MODEL.to_string(),
            binary_path: PathBuf::from(DEFAULT_WHISPER_BINARY),
            output_dir: std::env::temp_dir(),
        }
    }
}

impl TranscriptionConfig {
    pub fn is_known_model(name: &str) -> bool {
        KNOWN_WHISPER_MODELS.contains(&name)
    }
}
