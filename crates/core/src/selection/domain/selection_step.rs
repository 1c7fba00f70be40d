use super::choice_prompt::{Choice, ChoicePrompt, PromptError};
use crate::links::domain::link_resolver::ResolvedAudioReference;

/// Result of choosing which resolved audio link to transcribe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    NoReferences,
    Selected(ResolvedAudioReference),
    Cancelled,
}

/// Picks one reference: none → `NoReferences`, one → auto-selected,
/// several → the user is asked via `prompt`.
pub fn select_reference(
    mut references: Vec<ResolvedAudioReference>,
    prompt: &mut dyn ChoicePrompt,
) -> Result<Selection, PromptError> {
    match references.len() {
        0 => Ok(Selection::NoReferences),
        1 => Ok(Selection::Selected(references.remove(0))),
        _ => {
            let choices: Vec<Choice> = references
                .iter()
                .enumerate()
                .map(|(value, r)| Choice {
                    label: r.file.path.clone(),
                    value,
                })
                .collect();

            match prompt.present_choices(&choices)? {
                Some(value) if value < references.len() => {
                    Ok(Selection::Selected(references.swap_remove(value)))
                }
                Some(value) => {
                    log::warn!("Prompt returned unknown choice {value}, treating as cancel");
                    Ok(Selection::Cancelled)
                }
                None => Ok(Selection::Cancelled),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::domain::file_ref::FileRef;
    use std::sync::{Arc, Mutex};

    struct StubPrompt {
        answer: Option<usize>,
        offered: Arc<Mutex<Option<Vec<Choice>>>>,
    }

    impl StubPrompt {
        fn answering(answer: Option<usize>) -> Self {
            Self {
                answer,
                offered: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl ChoicePrompt for StubPrompt {
        fn present_choices(&mut self, choices: &[Choice]) -> Result<Option<usize>, PromptError> {
            *self.offered.lock().unwrap() = Some(choices.to_vec());
            Ok(self.answer)
        }
    }

    fn reference(path: &str, start: usize) -> ResolvedAudioReference {
        ResolvedAudioReference {
            file: FileRef::local(path, format!("/vault/{path}")),
            reference_text: path.to_string(),
            start_offset: start,
            end_offset: start + 10,
        }
    }

    #[test]
    fn test_no_references() {
        let mut prompt = StubPrompt::answering(Some(0));
        let offered = prompt.offered.clone();
        let selection = select_reference(vec![], &mut prompt).unwrap();
        assert_eq!(selection, Selection::NoReferences);
        assert!(offered.lock().unwrap().is_none());
    }

    #[test]
    fn test_single_reference_is_auto_selected() {
        let mut prompt = StubPrompt::answering(None);
        let offered = prompt.offered.clone();
        let selection = select_reference(vec![reference("a.mp3", 0)], &mut prompt).unwrap();
        assert_eq!(selection, Selection::Selected(reference("a.mp3", 0)));
        assert!(offered.lock().unwrap().is_none(), "no prompt expected");
    }

    #[test]
    fn test_many_references_prompt_with_one_entry_each() {
        let mut prompt = StubPrompt::answering(Some(1));
        let offered = prompt.offered.clone();
        let refs = vec![reference("a.mp3", 0), reference("b/b.wav", 20), reference("c.ogg", 40)];

        let selection = select_reference(refs, &mut prompt).unwrap();

        assert_eq!(selection, Selection::Selected(reference("b/b.wav", 20)));
        let offered = offered.lock().unwrap().clone().unwrap();
        let labels: Vec<_> = offered.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["a.mp3", "b/b.wav", "c.ogg"]);
    }

    #[test]
    fn test_cancel_returns_cancelled() {
        let mut prompt = StubPrompt::answering(None);
        let refs = vec![reference("a.mp3", 0), reference("b.mp3", 20)];
        assert_eq!(select_reference(refs, &mut prompt).unwrap(), Selection::Cancelled);
    }

    #[test]
    fn test_out_of_range_answer_is_cancel() {
        let mut prompt = StubPrompt::answering(Some(7));
        let refs = vec![reference("a.mp3", 0), reference("b.mp3", 20)];
        assert_eq!(select_reference(refs, &mut prompt).unwrap(), Selection::Cancelled);
    }

    #[test]
    fn test_duplicate_links_are_offered_separately() {
        let mut prompt = StubPrompt::answering(Some(1));
        let offered = prompt.offered.clone();
        let refs = vec![reference("a.mp3", 0), reference("a.mp3", 30)];

        let selection = select_reference(refs, &mut prompt).unwrap();

        assert_eq!(offered.lock().unwrap().as_ref().unwrap().len(), 2);
        assert_eq!(selection, Selection::Selected(reference("a.mp3", 30)));
    }
}
