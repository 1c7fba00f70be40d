/// Cross-cutting sink for user-visible pipeline notices.
///
/// Decouples the use case from how the host shows messages (terminal,
/// editor toast, nothing at all in tests).
pub trait Notifier: Send {
    /// Show a short, transient message to the user.
    fn notice(&mut self, message: &str);

    /// Record how long a named pipeline stage took. Default: no-op.
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
}

/// Silent notifier that discards all events.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notice(&mut self, _message: &str) {}
}

pub const NO_REFERENCES_NOTICE: &str = "No audio links found in this note.";
pub const UNSUPPORTED_BACKEND_NOTICE: &str =
    "Audio transcription only works for notes stored on a local file system.";
pub const TRANSCRIPTION_FAILED_NOTICE: &str = "Transcription failed. Check the log for details.";
pub const TRANSCRIPT_UNREADABLE_NOTICE: &str =
    "Could not read the transcription output. Check the log for details.";
pub const REFERENCE_MOVED_NOTICE: &str =
    "The audio link changed while transcribing; nothing was inserted.";
pub const NOTE_UPDATE_FAILED_NOTICE: &str = "Could not update the note. Check the log for details.";
pub const TRANSCRIPTION_INSERTED_NOTICE: &str = "Transcription inserted.";
