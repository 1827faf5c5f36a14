//! The only path from the letter generator to a language model.
//!
//! `AppState` holds an `Arc<dyn LetterWriter>`; production wires `LlmLetterWriter`,
//! route tests wire a canned stub.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait LetterWriter: Send + Sync {
    /// Turns a fully built prompt into letter text.
    async fn write_letter(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Claude-backed writer.
pub struct LlmLetterWriter(pub LlmClient);

#[async_trait]
impl LetterWriter for LlmLetterWriter {
    async fn write_letter(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.0.complete(prompt, system).await
    }
}
