use std::path::Path;
use std::process::ExitStatus;
use std::sync::atomic::AtomicBool;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("failed to start {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("speech-to-text process exited with {status}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("lost track of speech-to-text process: {0}")]
    Wait(#[source] std::io::Error),
    #[error("transcription worker stopped unexpectedly")]
    WorkerLost,
    #[error("transcription cancelled")]
    Cancelled,
}

/// Domain interface for running speech-to-text on one audio file.
///
/// Implementations block until the transcript has been written to
/// `naming_policy::transcript_path(self.output_dir(), audio_path)` and should
/// return `TranscriptionError::Cancelled` soon after `cancelled` is set.
pub trait TranscriptionInvoker: Send + Sync {
    fn invoke(&self, audio_path: &Path, cancelled: &AtomicBool) -> Result<(), TranscriptionError>;

    /// Folder the transcript is written to.
    fn output_dir(&self) -> &Path;
}
