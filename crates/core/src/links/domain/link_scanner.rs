use std::sync::LazyLock;

use regex::Regex;

use super::link_match::LinkMatch;
use crate::shared::constants::AUDIO_EXTENSIONS;

/// `[label](path.ext)` or `[[path.ext]]`, one alternation so a single
/// leftmost, non-overlapping scan covers both syntaxes.
static AUDIO_LINK: LazyLock<Regex> = LazyLock::new(|| {
    let extensions = AUDIO_EXTENSIONS.join("|");
    Regex::new(&format!(
        r"(?i)\[[^\]]*\]\(([^)]*\.(?:{extensions}))\)|\[\[([^\]]*\.(?:{extensions}))\]\]"
    ))
    .expect("audio link pattern is valid")
});

/// Scans note text for links to audio files, in document order.
///
/// Duplicates are kept: the same file linked twice yields two matches.
pub fn scan_audio_links(text: &str) -> Vec<LinkMatch> {
    let mut offsets = CharOffsets::new(text);
    let mut matches = Vec::new();

    for caps in AUDIO_LINK.captures_iter(text) {
        let Some(reference) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        if reference.as_str().is_empty() {
            continue;
        }
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let start_offset = offsets.char_offset(whole.start());
        let end_offset = offsets.char_offset(whole.end());
        matches.push(LinkMatch {
            reference_text: reference.as_str().to_string(),
            start_offset,
            end_offset,
        });
    }

    log::debug!("Found {} audio link(s)", matches.len());
    matches
}

/// Converts ascending byte offsets into char offsets without rescanning
/// from the start of the text each time.
struct CharOffsets<'a> {
    text: &'a str,
    last_byte: usize,
    last_char: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            last_byte: 0,
            last_char: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        self.last_char += self.text[self.last_byte..byte].chars().count();
        self.last_byte = byte;
        self.last_char
    }
}
