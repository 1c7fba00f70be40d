use crate::shared::constants::TRANSCRIPT_CALLOUT_HEADER;

/// Formats a transcript as a callout block, blank line before and after.
///
/// Every transcript line is quoted so multi-line transcripts stay inside
/// the callout.
pub fn format_transcript_block(transcript: &str) -> String {
    let body: Vec<String> = transcript
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();

    let mut block = format!("\n{TRANSCRIPT_CALLOUT_HEADER}\n");
    if body.is_empty() {
        block.push_str(">\n");
    } else {
        block.push_str(&body.join("\n"));
        block.push('\n');
    }
    block.push('\n');
    block
}
