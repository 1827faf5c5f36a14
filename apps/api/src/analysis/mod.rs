//! Extraction-and-matching pipeline.
//!
//! raw text → `extractor` → `StructuredDocument` ×2 → `matcher` → `assembler` → `AnalysisRecord`

pub mod assembler;
pub mod extractor;
pub mod handlers;
pub mod labels;
pub mod matcher;
pub mod priority;
pub mod sections;
pub mod taxonomy;

use crate::analysis::assembler::{assemble, AnalysisRecord};
use crate::analysis::extractor::{extract, DocumentKind};
use crate::analysis::matcher::match_skills;
use crate::analysis::taxonomy::SkillTaxonomy;

/// Runs the full pipeline on one résumé/posting pair.
pub fn analyze(taxonomy: &SkillTaxonomy, resume_text: &str, job_text: &str) -> AnalysisRecord {
    let resume = extract(taxonomy, resume_text, DocumentKind::Resume);
    let job = extract(taxonomy, job_text, DocumentKind::JobPosting);
    let match_result = match_skills(&resume.skills, &job.required_skills);

    tracing::debug!(
        score = match_result.match_score,
        matched = match_result.total_matched,
        required = match_result.total_required,
        "Analysis complete"
    );

    assemble(resume, job, match_result)
}
