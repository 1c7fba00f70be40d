use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::shared::constants::{HOME_BIN_DIRS, SYSTEM_BIN_DIRS};
use crate::transcription::domain::naming_policy::transcript_path;
use crate::transcription::domain::transcription_config::TranscriptionConfig;
use crate::transcription::domain::transcription_invoker::{
    TranscriptionError, TranscriptionInvoker,
};

/// How often the running child is checked for exit or cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the `whisper` command-line tool as a child process.
///
/// Invocation: `<binary> <audio> --model <model> --output_format txt --output_dir <dir>`.
/// The child's stdout and stderr are captured and logged, never parsed;
/// success is decided by exit status alone.
#[derive(Debug, Clone)]
pub struct WhisperCliInvoker {
    config: TranscriptionConfig,
}

impl WhisperCliInvoker {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self { config }
    }

    /// Builds the child command without spawning it.
    pub fn build_command(&self, audio_path: &Path) -> Command {
        let mut command = Command::new(&self.config.binary_path);
        command
            .arg(audio_path)
            .arg("--model")
            .arg(&self.config.model_name)
            .arg("--output_format")
            .arg("txt")
            .arg("--output_dir")
            .arg(&self.config.output_dir)
            .env("PATH", search_path(&self.config.binary_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl TranscriptionInvoker for WhisperCliInvoker {
    fn invoke(&self, audio_path: &Path, cancelled: &AtomicBool) -> Result<(), TranscriptionError> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| {
            TranscriptionError::OutputDir {
                path: self.config.output_dir.display().to_string(),
                source,
            }
        })?;

        log::info!(
            "Running {} on {} (model={}), expecting {}",
            self.config.binary_path.display(),
            audio_path.display(),
            self.config.model_name,
            transcript_path(&self.config.output_dir, audio_path).display()
        );
        let start = Instant::now();

        let mut child = self
            .build_command(audio_path)
            .spawn()
            .map_err(|source| TranscriptionError::Spawn {
                binary: self.config.binary_path.display().to_string(),
                source,
            })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = loop {
            if cancelled.load(Ordering::Relaxed) {
                log::info!("Cancelling transcription, killing pid {}", child.id());
                let _ = child.kill();
                let _ = child.wait();
                return Err(TranscriptionError::Cancelled);
            }
            match child.try_wait().map_err(TranscriptionError::Wait)? {
                Some(status) => break status,
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = stdout.map(join_output).unwrap_or_default();
        let stderr = stderr.map(join_output).unwrap_or_default();
        if !stdout.trim().is_empty() {
            log::debug!("whisper stdout:\n{}", stdout.trim_end());
        }

        if !status.success() {
            log::error!("whisper exited with {status}:\n{}", stderr.trim_end());
            return Err(TranscriptionError::Failed { status, stderr });
        }
        if !stderr.trim().is_empty() {
            log::debug!("whisper stderr:\n{}", stderr.trim_end());
        }

        log::info!(
            "Transcription finished in {:.1}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

/// Reads a child pipe to completion on its own thread so a chatty child
/// never blocks on a full pipe.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

fn join_output(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// `PATH` for the child: the binary's own folder and common user install
/// folders first, then the inherited `PATH`.
fn search_path(binary_path: &Path) -> OsString {
    let mut folders: Vec<PathBuf> = Vec::new();

    if let Some(parent) = binary_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        folders.push(parent.to_path_buf());
    }
    if let Some(home) = dirs::home_dir() {
        folders.extend(HOME_BIN_DIRS.iter().map(|d| home.join(d)));
    }
    folders.extend(SYSTEM_BIN_DIRS.iter().map(PathBuf::from));

    if let Some(inherited) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&inherited) {
            if !folders.contains(&dir) {
                folders.push(dir);
            }
        }
    }

    std::env::join_paths(&folders).unwrap_or_else(|e| {
        log::warn!("Could not extend PATH for speech-to-text binary: {e}");
        std::env::var_os("PATH").unwrap_or_default()
    })
}
