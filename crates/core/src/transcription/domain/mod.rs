pub mod naming_policy;
pub mod transcript_reader;
pub mod transcription_config;
pub mod transcription_invoker;
