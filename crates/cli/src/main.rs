use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use notescribe_core::document::infrastructure::markdown_file_document::MarkdownFileDocument;
use notescribe_core::links::infrastructure::vault_link_resolver::VaultLinkResolver;
use notescribe_core::pipeline::transcribe_link_use_case::{
    TranscribeLinkError, TranscribeLinkUseCase, TranscribeOutcome,
};
use notescribe_core::selection::infrastructure::terminal_choice_prompt::TerminalChoicePrompt;
use notescribe_core::shared::constants::KNOWN_WHISPER_MODELS;
use notescribe_core::transcription::domain::transcription_config::TranscriptionConfig;
use notescribe_core::transcription::infrastructure::whisper_cli_invoker::WhisperCliInvoker;

mod notifier;
mod settings;

use notifier::TerminalNotifier;
use settings::Settings;

/// Transcribe an audio link in a Markdown note and insert the transcript
/// below it.
#[derive(Parser)]
#[command(name = "notescribe")]
struct Cli {
    /// Markdown note containing links to audio files.
    note: PathBuf,

    /// Vault root used to resolve links (defaults to the note's folder).
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Whisper model size (tiny, base, small, medium, large, ...).
    #[arg(long)]
    model: Option<String>,

    /// Path to the whisper binary (defaults to `whisper` on PATH).
    #[arg(long)]
    whisper_binary: Option<PathBuf>,

    /// Folder whisper writes transcripts to (defaults to the temp folder).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only list the audio links that resolve; do not transcribe.
    #[arg(long)]
    dry_run: bool,

    /// Store the effective model, binary and output folder as defaults.
    #[arg(long)]
    save_settings: bool,

    /// Do not print notices (errors are still reported).
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Error, Debug)]
enum CliError {
    /// Bad arguments, settings or files; nothing was run yet.
    #[error("{0}")]
    Setup(Box<dyn std::error::Error>),
    /// Already logged and shown as a notice by the pipeline.
    #[error(transparent)]
    Transcription(#[from] TranscribeLinkError),
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        if let Some(message) = exit_message(&e) {
            eprintln!("{message}");
        }
        process::exit(1);
    }
}

/// What to print on exit. Pipeline failures print nothing more: the user
/// has seen the notice and the details are in the log.
fn exit_message(error: &CliError) -> Option<String> {
    match error {
        CliError::Setup(e) => Some(format!("Error: {e}")),
        CliError::Transcription(_) => None,
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let (mut use_case, mut document) = prepare(&cli).map_err(CliError::Setup)?;

    if cli.dry_run {
        return list_references(&use_case, &document, &mut io::stdout())
            .map_err(|e| CliError::Setup(e.into()));
    }

    match use_case.execute(&mut document, Arc::new(AtomicBool::new(false)))? {
        TranscribeOutcome::Inserted { audio, position } => {
            log::info!(
                "Transcript of {audio} written to {} at line {}",
                document.file_path().display(),
                position.line + 1
            );
        }
        TranscribeOutcome::NoReferences | TranscribeOutcome::Cancelled => {}
    }
    Ok(())
}

type Prepared = (TranscribeLinkUseCase, MarkdownFileDocument);

fn prepare(cli: &Cli) -> Result<Prepared, Box<dyn std::error::Error>> {
    validate(cli)?;

    let settings = apply_overrides(Settings::load(), cli);
    validate_settings(&settings)?;
    if cli.save_settings {
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }
    let config = settings.transcription_config();

    let vault_root = match &cli.vault {
        Some(vault) => vault.clone(),
        None => note_folder(&cli.note),
    };
    let resolver = VaultLinkResolver::new(&vault_root)?;
    let vault_path = resolver.vault_relative(&cli.note).ok_or_else(|| {
        format!(
            "Note {} is not inside vault {}",
            cli.note.display(),
            resolver.root().display()
        )
    })?;
    let document = MarkdownFileDocument::open(&cli.note, vault_path)?;

    Ok((build_use_case(resolver, config, cli.quiet), document))
}

fn build_use_case(
    resolver: VaultLinkResolver,
    config: TranscriptionConfig,
    quiet: bool,
) -> TranscribeLinkUseCase {
    let prompt = TerminalChoicePrompt::new(BufReader::new(io::stdin()), io::stderr());
    TranscribeLinkUseCase::new(
        Box::new(resolver),
        Box::new(prompt),
        Arc::new(WhisperCliInvoker::new(config)),
        Box::new(TerminalNotifier::new(quiet)),
    )
}

/// One `<vault path>\t<absolute path>` line per resolved audio link.
fn list_references(
    use_case: &TranscribeLinkUseCase,
    document: &MarkdownFileDocument,
    out: &mut impl Write,
) -> io::Result<()> {
    let references = use_case.find_audio_references(document);
    if references.is_empty() {
        eprintln!("No audio links found in this note.");
    }
    for reference in references {
        let location = reference
            .file
            .absolute_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        writeln!(out, "{}\t{}", reference.file.path, location)?;
    }
    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(model) = &cli.model {
        settings.whisper_model = model.clone();
    }
    if let Some(binary) = &cli.whisper_binary {
        settings.whisper_binary_path = Some(binary.clone());
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = Some(dir.clone());
    }
    settings
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.note.is_file() {
        return Err(format!("Note not found: {}", cli.note.display()).into());
    }
    if let Some(vault) = &cli.vault {
        if !vault.is_dir() {
            return Err(format!("Vault folder not found: {}", vault.display()).into());
        }
    }
    Ok(())
}

/// Checks the model after flags and `settings.json` have been merged.
fn validate_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let model = &settings.whisper_model;
    if !TranscriptionConfig::is_known_model(model) {
        return Err(format!(
            "Unknown whisper model '{model}'. Use one of: {}",
            KNOWN_WHISPER_MODELS.join(", ")
        )
        .into());
    }
    Ok(())
}

fn note_folder(note: &Path) -> PathBuf {
    match note.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("notescribe").chain(args.iter().copied()))
    }

    #[test]
    fn test_overrides_replace_settings() {
        let parsed = cli(&["note.md", "--model", "small", "--output-dir", "/tmp/out"]);
        let settings = apply_overrides(Settings::default(), &parsed);
        assert_eq!(settings.whisper_model, "small");
        assert_eq!(settings.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(settings.whisper_binary_path, None);
    }

    #[test]
    fn test_no_overrides_keep_settings() {
        let saved = Settings {
            whisper_model: "medium".to_string(),
            whisper_binary_path: Some(PathBuf::from("/opt/whisper")),
            output_dir: None,
        };
        let settings = apply_overrides(saved.clone(), &cli(&["note.md"]));
        assert_eq!(settings, saved);
    }

    #[test]
    fn test_unknown_model_flag_is_rejected() {
        let parsed = cli(&["note.md", "--model", "huge"]);
        let settings = apply_overrides(Settings::default(), &parsed);
        let err = validate_settings(&settings).unwrap_err().to_string();
        assert!(err.contains("Unknown whisper model"), "got: {err}");
    }

    #[test]
    fn test_unknown_model_from_settings_file_is_rejected() {
        let saved = Settings {
            whisper_model: "gigantic".to_string(),
            ..Settings::default()
        };
        let settings = apply_overrides(saved, &cli(&["note.md"]));
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_known_model_passes() {
        let parsed = cli(&["note.md", "--model", "small.en"]);
        let settings = apply_overrides(Settings::default(), &parsed);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_pipeline_failure_prints_nothing_on_exit() {
        let error = CliError::Transcription(TranscribeLinkError::ReferenceMoved {
            reference: "meeting.m4a".to_string(),
        });
        assert_eq!(exit_message(&error), None);
    }

    #[test]
    fn test_setup_failure_prints_error() {
        let error = CliError::Setup("Note not found: x.md".into());
        assert_eq!(exit_message(&error).as_deref(), Some("Error: Note not found: x.md"));
    }

    #[test]
    fn test_dry_run_lists_resolved_links_only() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("audio")).unwrap();
        std::fs::write(tmp.path().join("audio").join("meeting.m4a"), b"").unwrap();
        let note = tmp.path().join("note.md");
        std::fs::write(&note, "[[meeting.m4a]]\n[[missing.mp3]]\n").unwrap();

        let resolver = VaultLinkResolver::new(tmp.path()).unwrap();
        let vault_path = resolver.vault_relative(&note).unwrap();
        let document = MarkdownFileDocument::open(&note, vault_path).unwrap();
        let use_case = build_use_case(resolver, TranscriptionConfig::default(), true);
        let mut out = Vec::new();

        list_references(&use_case, &document, &mut out).unwrap();

        let listing = String::from_utf8(out).unwrap();
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 1, "got: {listing}");
        let (vault_path, absolute) = lines[0].split_once('\t').unwrap();
        assert_eq!(vault_path, "audio/meeting.m4a");
        assert!(Path::new(absolute).is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing_to_the_note() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.mp3"), b"").unwrap();
        let note = tmp.path().join("note.md");
        std::fs::write(&note, "[[a.mp3]]").unwrap();

        let resolver = VaultLinkResolver::new(tmp.path()).unwrap();
        let document = MarkdownFileDocument::open(&note, "note.md").unwrap();
        let use_case = build_use_case(resolver, TranscriptionConfig::default(), true);

        list_references(&use_case, &document, &mut Vec::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&note).unwrap(), "[[a.mp3]]");
    }

    #[test]
    fn test_validate_rejects_missing_note() {
        let parsed = cli(&["/nonexistent/note.md"]);
        assert!(validate(&parsed).is_err());
    }

    #[test]
    fn test_note_folder_of_bare_name_is_cwd() {
        assert_eq!(note_folder(Path::new("note.md")), PathBuf::from("."));
        assert_eq!(note_folder(Path::new("vault/note.md")), PathBuf::from("vault"));
    }
}
