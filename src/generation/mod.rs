//! Prompt construction for grounded answer generation

mod prompt;

pub use prompt::PromptBuilder;
