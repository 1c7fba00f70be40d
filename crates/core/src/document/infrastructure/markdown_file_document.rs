use std::fs;
use std::path::{Path, PathBuf};

use crate::document::domain::document::{Document, DocumentError};
use crate::document::domain::text_position::{offset_of_position, Position};

/// A Markdown note on the local disk, acting as the open editor document.
///
/// The file is the source of truth: `text()` re-reads it, so edits made
/// by another program while a transcription runs are seen, and every
/// insertion is written straight back (via a temp file and rename).
#[derive(Debug)]
pub struct MarkdownFileDocument {
    file_path: PathBuf,
    vault_path: String,
    text: String,
}

impl MarkdownFileDocument {
    /// Opens `file_path`; `vault_path` is its store-relative path.
    pub fn open(file_path: &Path, vault_path: impl Into<String>) -> Result<Self, DocumentError> {
        let text = read(file_path)?;
        Ok(Self {
            file_path: file_path.to_path_buf(),
            vault_path: vault_path.into(),
            text,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn write(&self, text: &str) -> Result<(), DocumentError> {
        let temp_path = self.file_path.with_extension("md.tmp");
        let to_error = |source| DocumentError::Write {
            path: self.file_path.display().to_string(),
            source,
        };
        fs::write(&temp_path, text).map_err(to_error)?;
        fs::rename(&temp_path, &self.file_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            to_error(e)
        })
    }
}

impl Document for MarkdownFileDocument {
    fn text(&self) -> String {
        match read(&self.file_path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{e}; using last known contents");
                self.text.clone()
            }
        }
    }

    fn path(&self) -> &str {
        &self.vault_path
    }

    fn insert_at(&mut self, position: Position, text: &str) -> Result<(), DocumentError> {
        let mut current = read(&self.file_path)?;

        let byte_index = match offset_of_position(&current, position) {
            Some(offset) => current
                .char_indices()
                .nth(offset)
                .map(|(i, _)| i)
                .unwrap_or(current.len()),
            None => {
                if !current.is_empty() && !current.ends_with('\n') {
                    current.push('\n');
                }
                current.len()
            }
        };
        current.insert_str(byte_index, text);

        self.write(&current)?;
        log::debug!(
            "Inserted {} chars at line {} of {}",
            text.chars().count(),
            position.line,
            self.file_path.display()
        );
        self.text = current;
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })
}
