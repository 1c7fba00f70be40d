use super::file_ref::FileRef;
use super::link_match::LinkMatch;

/// Domain interface for the host's link resolution.
///
/// `relative_to` is the store-relative path of the note holding the link.
/// Implementations decide how ambiguous references are settled (same folder,
/// shortest path, aliases). Returns `None` when no existing file matches.
pub trait LinkResolver: Send {
    fn resolve_reference(&self, reference: &str, relative_to: &str) -> Option<FileRef>;
}

/// A link whose reference resolved to an existing file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAudioReference {
    pub file: FileRef,
    pub reference_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Resolves every match against `document_path`, dropping the ones that do
/// not point at an existing file. Order is preserved.
pub fn resolve_all(
    matches: &[LinkMatch],
    document_path: &str,
    resolver: &dyn LinkResolver,
) -> Vec<ResolvedAudioReference> {
    matches
        .iter()
        .filter_map(|m| {
            let file = resolver.resolve_reference(&m.reference_text, document_path);
            if file.is_none() {
                log::debug!("Unresolved audio link: {}", m.reference_text);
            }
            file.map(|file| ResolvedAudioReference {
                file,
                reference_text: m.reference_text.clone(),
                start_offset: m.start_offset,
                end_offset: m.end_offset,
            })
        })
        .collect()
}
