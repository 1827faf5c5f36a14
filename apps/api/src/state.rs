use std::sync::Arc;

use crate::analysis::taxonomy::SkillTaxonomy;
use crate::config::Config;
use crate::letter::writer::LetterWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only afterwards.
    pub taxonomy: Arc<SkillTaxonomy>,
    /// Pluggable letter writer. Default: Claude via `LlmLetterWriter`.
    pub letter_writer: Arc<dyn LetterWriter>,
}
