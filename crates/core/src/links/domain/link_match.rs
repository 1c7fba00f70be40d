/// One audio link found in a note.
///
/// Offsets are character offsets into the exact text snapshot the scan ran
/// over. `start_offset` points at the opening `[`, `end_offset` one past the
/// closing `)` or `]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkMatch {
    pub reference_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl LinkMatch {
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full bracketed construct this match covers in `text`.
    pub fn raw_text(&self, text: &str) -> String {
        text.chars()
            .skip(self.start_offset)
            .take(self.len())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_spans_whole_construct() {
        let m = LinkMatch {
            reference_text: "a.mp3".to_string(),
            start_offset: 4,
            end_offset: 13,
        };
        assert_eq!(m.len(), 9);
        assert!(!m.is_empty());
    }

    #[test]
    fn test_raw_text_uses_char_offsets() {
        let text = "héé [[a.mp3]] done";
        let m = LinkMatch {
            reference_text: "a.mp3".to_string(),
            start_offset: 4,
            end_offset: 13,
        };
        assert_eq!(m.raw_text(text), "[[a.mp3]]");
    }
}
