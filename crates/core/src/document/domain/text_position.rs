/// Zero-based line/column location in a note. Columns count characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Zero-based line holding character `offset`: the number of newlines in
/// the text before it. Offsets past the end count every newline.
pub fn line_of_offset(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count()
}

/// Where a block following the link that ends at `end_offset` goes: the
/// start of the next line.
pub fn insertion_position(text: &str, end_offset: usize) -> Position {
    Position {
        line: line_of_offset(text, end_offset) + 1,
        column: 0,
    }
}

/// Character offset of `position` in `text`, or `None` if the line does not
/// exist. The column is clamped to the line's length.
pub fn offset_of_position(text: &str, position: Position) -> Option<usize> {
    let mut offset = 0;
    for (index, line) in text.split('\n').enumerate() {
        let len = line.chars().count();
        if index == position.line {
            return Some(offset + position.column.min(len));
        }
        offset += len + 1;
    }
    None
}
