pub mod terminal_choice_prompt;
