//! Skill Matcher — compares a résumé's skills with a posting's requirements.
//!
//! Pure and deterministic: set in, `MatchResult` out. No taxonomy access, no I/O.
//!
//! Scoring:
//! - nothing required → `EMPTY_REQUIREMENTS_SCORE`
//! - otherwise `100 × matched / required`, rounded half-up, clamped to 0–100

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::CanonicalSkill;

/// Score reported when the posting names no required skills.
pub const EMPTY_REQUIREMENTS_SCORE: u32 = 100;

/// Scores at or above this get the strong-match banner.
pub const STRONG_MATCH_THRESHOLD: u32 = 70;

/// Scores at or above this (and below strong) get the moderate banner.
pub const MODERATE_MATCH_THRESHOLD: u32 = 50;

/// Missing skills are listed this many per advisory line.
pub const MISSING_SKILLS_BATCH_SIZE: usize = 3;

pub const STRONG_MATCH_BANNER: &str =
    "Strong skill match! Emphasize your relevant experience in the letter.";
pub const MODERATE_MATCH_BANNER: &str =
    "Moderate skill match. Highlight transferable experience for the missing skills.";
pub const WEAK_MATCH_BANNER: &str =
    "Weak skill match. Consider gaining more of the required skills before applying.";
pub const NO_REQUIREMENTS_BANNER: &str =
    "No required skills were detected in the job description; nothing to match against.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matching_skills: BTreeSet<CanonicalSkill>,
    pub missing_skills: BTreeSet<CanonicalSkill>,
    pub match_score: u32, // 0 – 100
    pub total_matched: usize,
    pub total_required: usize,
    pub recommendations: Vec<String>,
}

/// Qualitative band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Strong,
    Moderate,
    Weak,
}

impl MatchStrength {
    pub fn from_score(score: u32) -> Self {
        if score >= STRONG_MATCH_THRESHOLD {
            Self::Strong
        } else if score >= MODERATE_MATCH_THRESHOLD {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Self::Strong => STRONG_MATCH_BANNER,
            Self::Moderate => MODERATE_MATCH_BANNER,
            Self::Weak => WEAK_MATCH_BANNER,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

pub fn match_skills(
    resume_skills: &BTreeSet<CanonicalSkill>,
    required_skills: &BTreeSet<CanonicalSkill>,
) -> MatchResult {
    let matching_skills: BTreeSet<CanonicalSkill> = resume_skills
        .intersection(required_skills)
        .cloned()
        .collect();
    let missing_skills: BTreeSet<CanonicalSkill> = required_skills
        .difference(resume_skills)
        .cloned()
        .collect();

    let total_matched = matching_skills.len();
    let total_required = required_skills.len();
    let match_score = score(total_matched, total_required);
    let recommendations = build_recommendations(match_score, total_required, &missing_skills);

    MatchResult {
        matching_skills,
        missing_skills,
        match_score,
        total_matched,
        total_required,
        recommendations,
    }
}

/// `round_half_up(100 × matched / required)` in integer arithmetic.
fn score(matched: usize, required: usize) -> u32 {
    if required == 0 {
        return EMPTY_REQUIREMENTS_SCORE;
    }
    let matched = matched.min(required) as u64;
    let required = required as u64;
    let rounded = (200 * matched + required) / (2 * required);
    rounded.min(100) as u32
}

/// One banner, then one "consider learning" line per batch of missing skills.
fn build_recommendations(
    score: u32,
    total_required: usize,
    missing: &BTreeSet<CanonicalSkill>,
) -> Vec<String> {
    if total_required == 0 {
        return vec![NO_REQUIREMENTS_BANNER.to_string()];
    }

    let mut recommendations = vec![MatchStrength::from_score(score).banner().to_string()];

    let missing: Vec<&str> = missing.iter().map(CanonicalSkill::as_str).collect();
    recommendations.extend(
        missing
            .chunks(MISSING_SKILLS_BATCH_SIZE)
            .map(|batch| format!("Consider learning or highlighting: {}.", batch.join(", "))),
    );

    recommendations
}
