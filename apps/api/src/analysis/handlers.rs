//! Axum route handlers for the Analysis API.

use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::analyze;
use crate::analysis::assembler::AnalysisRecord;
use crate::analysis::extractor::{extract, DocumentKind, StructuredDocument};
use crate::analysis::matcher::{match_skills, MatchResult};
use crate::analysis::priority::{rank_skill_priorities, SkillPriority};
use crate::analysis::taxonomy::{CanonicalSkill, SkillCategory, SkillTaxonomy};
use crate::documents::upload::{extract_upload_text, read_upload_form};
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::{validate_job_description, validate_resume_text};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeSkillsRequest {
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_requirements: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeSkillsResponse {
    #[serde(flatten)]
    pub match_result: MatchResult,
    /// Matching skills split by taxonomy category.
    pub technical_skills: Vec<CanonicalSkill>,
    pub soft_skills: Vec<CanonicalSkill>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    pub job_data: StructuredDocument,
    pub skill_priorities: Vec<SkillPriority>,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub resume_data: StructuredDocument,
    pub text_length: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Full extraction-and-matching pipeline on pasted résumé text and a posting.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisRecord>, AppError> {
    validate_job_description(&request.job_description)?;
    validate_resume_text(&request.resume_text)?;

    let record = analyze(&state.taxonomy, &request.resume_text, &request.job_description);
    Ok(Json(record))
}

/// POST /api/analyze-skills
///
/// Matches two explicit skill lists without any document extraction.
pub async fn handle_analyze_skills(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeSkillsRequest>,
) -> Result<Json<AnalyzeSkillsResponse>, AppError> {
    let resume_skills = canonical_set(&state.taxonomy, &request.resume_skills);
    let job_requirements = canonical_set(&state.taxonomy, &request.job_requirements);

    let match_result = match_skills(&resume_skills, &job_requirements);

    let by_category = |category: SkillCategory| -> Vec<CanonicalSkill> {
        match_result
            .matching_skills
            .iter()
            .filter(|skill| state.taxonomy.category(skill) == Some(category))
            .cloned()
            .collect()
    };
    let technical_skills = by_category(SkillCategory::Technical);
    let soft_skills = by_category(SkillCategory::Soft);

    Ok(Json(AnalyzeSkillsResponse {
        match_result,
        technical_skills,
        soft_skills,
    }))
}

/// POST /api/analyze-job
///
/// Extracts a posting and ranks its required skills by emphasis. Preferred
/// skills are reported but never ranked.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    validate_job_description(&request.job_description)?;

    let job_data = extract(&state.taxonomy, &request.job_description, DocumentKind::JobPosting);
    let skill_priorities = rank_skill_priorities(
        &state.taxonomy,
        &job_data.required_skills,
        &request.job_description,
    );

    Ok(Json(AnalyzeJobResponse {
        job_data,
        skill_priorities,
    }))
}

/// POST /api/parse-resume
///
/// Multipart upload (`resume` field) → extracted résumé document.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let file = form.require_resume()?;
    let text = extract_upload_text(file, state.config.max_upload_bytes).await?;

    let resume_data = extract(&state.taxonomy, &text, DocumentKind::Resume);
    tracing::info!(
        filename = %file.filename,
        skills = resume_data.skills.len(),
        "Parsed resume upload"
    );

    Ok(Json(ParseResumeResponse {
        resume_data,
        text_length: text.chars().count(),
    }))
}

/// Canonical name when the taxonomy knows the string, else the trimmed string itself.
fn canonical_set(taxonomy: &SkillTaxonomy, raw: &[String]) -> BTreeSet<CanonicalSkill> {
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| taxonomy.canonicalize(s).unwrap_or_else(|| CanonicalSkill::new(s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_set_keeps_unknown_verbatim() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let raw = vec![
            "python".to_string(),
            " k8s ".to_string(),
            "".to_string(),
            "Underwater Basket Weaving".to_string(),
        ];

        let set = canonical_set(&taxonomy, &raw);

        assert_eq!(set.len(), 3);
        assert!(set.contains(&CanonicalSkill::new("Python")));
        assert!(set.contains(&CanonicalSkill::new("Kubernetes")));
        assert!(set.contains(&CanonicalSkill::new("Underwater Basket Weaving")));
    }
}
