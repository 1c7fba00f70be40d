pub mod choice_prompt;
pub mod selection_step;
