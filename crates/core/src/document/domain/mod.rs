pub mod document;
pub mod text_position;
pub mod transcript_block;
