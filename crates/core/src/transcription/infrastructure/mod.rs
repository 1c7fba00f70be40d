pub mod transcription_worker;
pub mod whisper_cli_invoker;
