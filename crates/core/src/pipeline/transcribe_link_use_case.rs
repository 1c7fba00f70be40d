use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::document::domain::document::{Document, DocumentError};
use crate::document::domain::text_position::{insertion_position, Position};
use crate::document::domain::transcript_block::format_transcript_block;
use crate::links::domain::link_match::LinkMatch;
use crate::links::domain::link_resolver::{resolve_all, LinkResolver, ResolvedAudioReference};
use crate::links::domain::link_scanner::scan_audio_links;
use crate::pipeline::notifier::{
    Notifier, NOTE_UPDATE_FAILED_NOTICE, NO_REFERENCES_NOTICE, REFERENCE_MOVED_NOTICE,
    TRANSCRIPTION_FAILED_NOTICE, TRANSCRIPTION_INSERTED_NOTICE, TRANSCRIPT_UNREADABLE_NOTICE,
    UNSUPPORTED_BACKEND_NOTICE,
};
use crate::selection::domain::choice_prompt::{ChoicePrompt, PromptError};
use crate::selection::domain::selection_step::{select_reference, Selection};
use crate::transcription::domain::transcript_reader::{read_transcript, TranscriptReadError};
use crate::transcription::domain::transcription_invoker::{
    TranscriptionError, TranscriptionInvoker,
};
use crate::transcription::infrastructure::transcription_worker;

#[derive(Error, Debug)]
pub enum TranscribeLinkError {
    #[error("{path} is not stored on a local file system")]
    UnsupportedBackend { path: String },
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    TranscriptUnreadable(#[from] TranscriptReadError),
    #[error("audio link '{reference}' is no longer in the note")]
    ReferenceMoved { reference: String },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl TranscribeLinkError {
    /// The generic message shown to the user; details stay in the log.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::UnsupportedBackend { .. } => UNSUPPORTED_BACKEND_NOTICE,
            Self::Transcription(_) | Self::Prompt(_) => TRANSCRIPTION_FAILED_NOTICE,
            Self::TranscriptUnreadable(_) => TRANSCRIPT_UNREADABLE_NOTICE,
            Self::ReferenceMoved { .. } => REFERENCE_MOVED_NOTICE,
            Self::Document(_) => NOTE_UPDATE_FAILED_NOTICE,
        }
    }
}

/// How a run ended when nothing went wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranscribeOutcome {
    Inserted { audio: String, position: Position },
    NoReferences,
    Cancelled,
}

/// "Transcribe audio link in note": scan → resolve → select → transcribe →
/// read transcript → insert after the link's line.
///
/// Every stage runs once, in order; the first failure ends the run. Each
/// call starts from a fresh scan of the document.
pub struct TranscribeLinkUseCase {
    resolver: Box<dyn LinkResolver>,
    prompt: Box<dyn ChoicePrompt>,
    invoker: Arc<dyn TranscriptionInvoker>,
    notifier: Box<dyn Notifier>,
}

impl TranscribeLinkUseCase {
    pub fn new(
        resolver: Box<dyn LinkResolver>,
        prompt: Box<dyn ChoicePrompt>,
        invoker: Arc<dyn TranscriptionInvoker>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            resolver,
            prompt,
            invoker,
            notifier,
        }
    }

    /// Audio links in `document` that resolve to existing files.
    pub fn find_audio_references(&self, document: &dyn Document) -> Vec<ResolvedAudioReference> {
        let matches = scan_audio_links(&document.text());
        resolve_all(&matches, document.path(), self.resolver.as_ref())
    }

    /// Runs the whole pipeline. Setting `cancelled` while the speech-to-text
    /// process runs stops it and ends the run as `Cancelled`.
    pub fn execute(
        &mut self,
        document: &mut dyn Document,
        cancelled: Arc<AtomicBool>,
    ) -> Result<TranscribeOutcome, TranscribeLinkError> {
        match self.run(document, cancelled) {
            Err(TranscribeLinkError::Transcription(TranscriptionError::Cancelled)) => {
                log::info!("Transcription cancelled");
                Ok(TranscribeOutcome::Cancelled)
            }
            Err(e) => {
                log::error!("Transcription of {} failed: {e:?}", document.path());
                self.notifier.notice(e.notice());
                Err(e)
            }
            outcome => outcome,
        }
    }

    fn run(
        &mut self,
        document: &mut dyn Document,
        cancelled: Arc<AtomicBool>,
    ) -> Result<TranscribeOutcome, TranscribeLinkError> {
        let snapshot = document.text();

        let stage = Instant::now();
        let matches = scan_audio_links(&snapshot);
        let references = resolve_all(&matches, document.path(), self.resolver.as_ref());
        log::info!(
            "{}: {} audio link(s), {} resolved",
            document.path(),
            matches.len(),
            references.len()
        );
        self.notifier.timing("scan", elapsed_ms(stage));

        let reference = match select_reference(references, self.prompt.as_mut())? {
            Selection::Selected(reference) => reference,
            Selection::NoReferences => {
                self.notifier.notice(NO_REFERENCES_NOTICE);
                return Ok(TranscribeOutcome::NoReferences);
            }
            Selection::Cancelled => {
                log::info!("Audio selection cancelled");
                return Ok(TranscribeOutcome::Cancelled);
            }
        };

        let audio_path = reference
            .file
            .absolute_path()
            .ok_or_else(|| TranscribeLinkError::UnsupportedBackend {
                path: reference.file.path.clone(),
            })?
            .to_path_buf();

        if cancelled.load(Ordering::Relaxed) {
            return Ok(TranscribeOutcome::Cancelled);
        }

        self.notifier
            .notice(&format!("Transcribing {}...", reference.file.path));
        let stage = Instant::now();
        transcription_worker::run(self.invoker.clone(), audio_path.clone(), cancelled)?;
        let transcript = read_transcript(self.invoker.output_dir(), &audio_path)?;
        self.notifier.timing("transcribe", elapsed_ms(stage));

        let live = document.text();
        let end_offset = relocate_end_offset(&snapshot, &live, &reference).ok_or_else(|| {
            TranscribeLinkError::ReferenceMoved {
                reference: reference.reference_text.clone(),
            }
        })?;
        let position = insertion_position(&live, end_offset);
        document.insert_at(position, &format_transcript_block(&transcript))?;

        log::info!(
            "Inserted {} chars of transcript at line {} of {}",
            transcript.chars().count(),
            position.line,
            document.path()
        );
        self.notifier.notice(TRANSCRIPTION_INSERTED_NOTICE);
        Ok(TranscribeOutcome::Inserted {
            audio: reference.file.path,
            position,
        })
    }
}

/// End offset of the selected link in the live text.
///
/// The note may have been edited while the user was choosing or while the
/// transcription ran. If the original span still holds the same link it is
/// used as is; otherwise the live text is rescanned and the same reference
/// nearest its old position wins.
fn relocate_end_offset(
    snapshot: &str,
    live: &str,
    reference: &ResolvedAudioReference,
) -> Option<usize> {
    let original = LinkMatch {
        reference_text: reference.reference_text.clone(),
        start_offset: reference.start_offset,
        end_offset: reference.end_offset,
    };
    if snapshot == live || original.raw_text(live) == original.raw_text(snapshot) {
        return Some(original.end_offset);
    }

    let relocated = scan_audio_links(live)
        .into_iter()
        .filter(|m| m.reference_text == original.reference_text)
        .min_by_key(|m| m.start_offset.abs_diff(original.start_offset))?;
    log::warn!(
        "Note changed during transcription; link '{}' moved from offset {} to {}",
        original.reference_text,
        original.start_offset,
        relocated.start_offset
    );
    Some(relocated.end_offset)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
