//! Cheap plausibility checks run on request input before the pipeline.
//!
//! Failures come back as `AppError::Validation` (400), oversized uploads as
//! `AppError::PayloadTooLarge` (413).

use crate::errors::AppError;

/// Minimum trimmed length of a job description.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

/// Minimum trimmed length of extracted résumé text.
pub const MIN_RESUME_CHARS: usize = 100;

/// Distinct vocabulary hits required in either document.
pub const MIN_KEYWORD_HITS: usize = 3;

const JOB_KEYWORDS: &[&str] = &[
    "position",
    "role",
    "responsibilities",
    "requirements",
    "experience",
    "skills",
    "qualifications",
    "company",
    "job",
    "work",
    "candidate",
    "team",
    "project",
];

const RESUME_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "university",
    "college",
    "degree",
    "project",
    "achievement",
    "responsibility",
];

/// Rejects postings too thin to analyze.
pub fn validate_job_description(text: &str) -> Result<(), AppError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "Job description is too short. Provide at least {MIN_JOB_DESCRIPTION_CHARS} characters."
        )));
    }
    if keyword_hits(trimmed, JOB_KEYWORDS) < MIN_KEYWORD_HITS {
        return Err(AppError::Validation(
            "Job description does not look like a job posting. Include the role, requirements and responsibilities."
                .to_string(),
        ));
    }
    Ok(())
}

pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(format!(
            "Resume content is too short. At least {MIN_RESUME_CHARS} characters of text are required."
        )));
    }
    if keyword_hits(trimmed, RESUME_KEYWORDS) < MIN_KEYWORD_HITS {
        return Err(AppError::Validation(
            "Resume content appears to be insufficient. Upload a resume with experience, education and skills."
                .to_string(),
        ));
    }
    Ok(())
}

/// Uploads must be non-empty and no larger than `max_bytes`.
pub fn validate_upload_size(len: usize, max_bytes: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if len > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Uploaded file is too large ({len} bytes). Maximum is {max_bytes} bytes."
        )));
    }
    Ok(())
}

/// Counts distinct vocabulary words present anywhere in `text` (substring, case-insensitive).
fn keyword_hits(text: &str, vocabulary: &[&str]) -> usize {
    let lower = text.to_lowercase();
    vocabulary.iter().filter(|kw| lower.contains(*kw)).count()
}
