// Cover letter generation: template styles, prompt construction, post-processing.
// All LLM calls go through the LetterWriter seam, never the Anthropic API directly.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod style;
pub mod writer;
