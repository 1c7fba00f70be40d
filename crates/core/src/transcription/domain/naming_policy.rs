use std::path::{Path, PathBuf};

use crate::shared::constants::{AUDIO_EXTENSIONS, TRANSCRIPT_EXTENSION};

/// Where the speech-to-text binary writes the transcript for `audio_path`:
/// `<output_dir>/<base name without audio extension>.txt`.
///
/// The invoker and the reader both go through this function, so the two
/// always agree with the binary's naming convention.
pub fn transcript_path(output_dir: &Path, audio_path: &Path) -> PathBuf {
    let file_name = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!(
        "{}.{TRANSCRIPT_EXTENSION}",
        strip_audio_extension(&file_name)
    ))
}

/// Removes a trailing recognized audio extension (case-insensitive).
/// Other extensions are kept.
pub fn strip_audio_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()) =>
        {
            stem
        }
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::mp3("meeting.mp3", "meeting")]
    #[case::upper("Meeting.M4A", "Meeting")]
    #[case::inner_dots("2024.01.05 call.flac", "2024.01.05 call")]
    #[case::not_audio("notes.txt", "notes.txt")]
    #[case::no_extension("recording", "recording")]
    #[case::dotfile(".wav", ".wav")]
    fn test_strip_audio_extension(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_audio_extension(input), expected);
    }

    #[test]
    fn test_transcript_path_uses_output_dir_and_base_name() {
        let path = transcript_path(Path::new("/tmp/out"), Path::new("/vault/audio/meeting.m4a"));
        assert_eq!(path, PathBuf::from("/tmp/out/meeting.txt"));
    }
}
