use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::naming_policy::transcript_path;

#[derive(Error, Debug)]
#[error("failed to read transcript {path}: {source}")]
pub struct TranscriptReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Reads the transcript written for `audio_path`, trimmed of surrounding
/// whitespace.
pub fn read_transcript(output_dir: &Path, audio_path: &Path) -> Result<String, TranscriptReadError> {
    let path = transcript_path(output_dir, audio_path);
    let text = fs::read_to_string(&path).map_err(|source| TranscriptReadError {
        path: path.clone(),
        source,
    })?;
    log::debug!("Read {} bytes of transcript from {}", text.len(), path.display());
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_and_trims() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("meeting.txt"), "\n  Hello world \n\n").unwrap();

        let text = read_transcript(tmp.path(), Path::new("/vault/meeting.m4a")).unwrap();

        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_keeps_inner_lines() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("call.txt"), "First line.\nSecond line.\n").unwrap();

        let text = read_transcript(tmp.path(), Path::new("call.WAV")).unwrap();

        assert_eq!(text, "First line.\nSecond line.");
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_transcript(tmp.path(), Path::new("absent.mp3")).unwrap_err();
        assert_eq!(err.path, tmp.path().join("absent.txt"));
        assert!(err.to_string().contains("absent.txt"));
    }
}
