pub mod document;
pub mod links;
pub mod pipeline;
pub mod selection;
pub mod shared;
pub mod transcription;
