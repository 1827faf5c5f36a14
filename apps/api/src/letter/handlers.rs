//! Axum route handlers for the Letter API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::analyze;
use crate::analysis::assembler::AnalysisRecord;
use crate::documents::upload::{extract_upload_text, read_upload_form};
use crate::errors::AppError;
use crate::letter::generator::generate_cover_letter;
use crate::letter::style::{catalog, TemplateInfo, TemplateStyle};
use crate::state::AppState;
use crate::validation::{validate_job_description, validate_resume_text};

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const TEMPLATE_STYLE_FIELD: &str = "template_style";
const CUSTOM_MESSAGE_FIELD: &str = "custom_message";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LetterMetadata {
    pub template_used: TemplateStyle,
    pub word_count: usize,
    pub generated_at: DateTime<Utc>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateLetterResponse {
    pub request_id: Uuid,
    pub cover_letter: String,
    pub analysis: AnalysisRecord,
    pub metadata: LetterMetadata,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-cover-letter
///
/// Multipart form: `resume` file, `job_description`, optional `template_style`
/// and `custom_message`. Validation → extraction → analysis → letter.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateLetterResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let job_description = form.text(JOB_DESCRIPTION_FIELD).unwrap_or_default();
    validate_job_description(job_description)?;

    let file = form.require_resume()?;
    let resume_text = extract_upload_text(file, state.config.max_upload_bytes).await?;
    validate_resume_text(&resume_text)?;

    let style = form
        .text(TEMPLATE_STYLE_FIELD)
        .map(TemplateStyle::from_param)
        .unwrap_or_default();
    let custom_message = form.text(CUSTOM_MESSAGE_FIELD);

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, filename = %file.filename, style = style.as_str(), "Cover letter requested");

    let analysis = analyze(&state.taxonomy, &resume_text, job_description);
    let letter = generate_cover_letter(
        state.letter_writer.as_ref(),
        &state.taxonomy,
        &analysis,
        style,
        custom_message,
    )
    .await?;

    Ok(Json(GenerateLetterResponse {
        request_id,
        cover_letter: letter.cover_letter,
        metadata: LetterMetadata {
            template_used: letter.template_used,
            word_count: letter.word_count,
            generated_at: Utc::now(),
            recommendations: letter.suggestions,
        },
        analysis,
    }))
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: catalog(),
    })
}
