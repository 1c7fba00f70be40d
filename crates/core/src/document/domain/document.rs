use thiserror::Error;

use super::text_position::Position;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to write note {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read note {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for the note open in the host editor.
pub trait Document: Send {
    /// Full current text.
    fn text(&self) -> String;

    /// Store-relative path of the note, used to resolve its links.
    fn path(&self) -> &str;

    /// Inserts `text` at `position`. A line past the end of the note means
    /// "append after the last line".
    fn insert_at(&mut self, position: Position, text: &str) -> Result<(), DocumentError>;
}
