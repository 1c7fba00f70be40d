pub mod notifier;
pub mod transcribe_link_use_case;
