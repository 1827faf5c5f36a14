use serde::{Deserialize, Serialize};

use crate::analysis::extractor::StructuredDocument;
use crate::analysis::matcher::MatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCounts {
    pub skills_count: usize,
    pub experience_count: usize,
    pub education_count: usize,
    pub required_skills_count: usize,
}

/// Everything the API and the letter generator need about one résumé/posting pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub resume: StructuredDocument,
    pub job: StructuredDocument,
    pub match_result: MatchResult,
    pub counts: AnalysisCounts,
}

pub fn assemble(
    resume: StructuredDocument,
    job: StructuredDocument,
    match_result: MatchResult,
) -> AnalysisRecord {
    let counts = AnalysisCounts {
        skills_count: resume.skills.len(),
        experience_count: resume.experience_entries.len(),
        education_count: resume.education_entries.len(),
        required_skills_count: job.required_skills.len(),
    };

    AnalysisRecord {
        resume,
        job,
        match_result,
        counts,
    }
}
