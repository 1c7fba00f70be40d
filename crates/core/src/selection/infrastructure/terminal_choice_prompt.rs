use std::io::{BufRead, Write};

use crate::selection::domain::choice_prompt::{Choice, ChoicePrompt, PromptError};

/// Numbered-list prompt on a text terminal.
///
/// Entries are printed as `  1) label`. The user answers with a number;
/// an empty line, `q`, or end of input cancels. Anything else re-prompts.
pub struct TerminalChoicePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead + Send, W: Write + Send> TerminalChoicePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead + Send, W: Write + Send> ChoicePrompt for TerminalChoicePrompt<R, W> {
    fn present_choices(&mut self, choices: &[Choice]) -> Result<Option<usize>, PromptError> {
        writeln!(self.output, "Select an audio file to transcribe:")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice.label)?;
        }

        loop {
            write!(self.output, "Number (empty to cancel): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(choices[n - 1].value)),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    choices.len()
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn choices() -> Vec<Choice> {
        vec![
            Choice {
                label: "audio/a.mp3".to_string(),
                value: 0,
            },
            Choice {
                label: "audio/b.wav".to_string(),
                value: 1,
            },
        ]
    }

    fn ask(input: &str) -> (Option<usize>, String) {
        let mut output = Vec::new();
        let answer = {
            let mut prompt = TerminalChoicePrompt::new(Cursor::new(input.as_bytes()), &mut output);
            prompt.present_choices(&choices()).unwrap()
        };
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_lists_every_choice() {
        let (_, output) = ask("1\n");
        assert!(output.contains("1) audio/a.mp3"));
        assert!(output.contains("2) audio/b.wav"));
    }

    #[rstest]
    #[case::first("1\n", Some(0))]
    #[case::second(" 2 \n", Some(1))]
    #[case::empty_line("\n", None)]
    #[case::quit("q\n", None)]
    #[case::eof("", None)]
    fn test_answers(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(ask(input).0, expected);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (answer, output) = ask("zero\n5\n2\n");
        assert_eq!(answer, Some(1));
        assert_eq!(output.matches("Please enter a number between 1 and 2.").count(), 2);
    }
}
