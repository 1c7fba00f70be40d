/// Audio file extensions recognized in note links (matched case-insensitively).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg", "aac"];

/// Extension of the plain-text file written by the speech-to-text binary.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

pub const DEFAULT_WHISPER_MODEL: &str = "base";
pub const DEFAULT_WHISPER_BINARY: &str = "whisper";

/// Model names accepted by the `whisper` command-line tool.
pub const KNOWN_WHISPER_MODELS: &[&str] = &[
    "tiny",
    "tiny.en",
    "base",
    "base.en",
    "small",
    "small.en",
    "medium",
    "medium.en",
    "large",
    "large-v1",
    "large-v2",
    "large-v3",
    "large-v3-turbo",
    "turbo",
];

/// Header line of the callout block inserted after an audio link.
pub const TRANSCRIPT_CALLOUT_HEADER: &str = "> [!note] Transcription";

/// Directories where user-installed speech-to-text tools commonly live,
/// relative to the home directory or absolute.
pub const HOME_BIN_DIRS: &[&str] = &[".local/bin"];
pub const SYSTEM_BIN_DIRS: &[&str] = &["/usr/local/bin", "/opt/homebrew/bin"];
