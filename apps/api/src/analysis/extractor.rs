//! Entity Extractor — turns raw résumé or job-posting text into a `StructuredDocument`.
//!
//! Best-effort and recall-first: extraction never fails. Malformed or empty input
//! simply yields a document with empty collections and `"Not specified"` labels.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::labels;
use crate::analysis::sections::{self, Section, SectionKind};
use crate::analysis::taxonomy::{CanonicalSkill, SkillTaxonomy};

pub use crate::analysis::labels::ContactInfo;

/// Placeholder for job labels the posting does not state.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Separators between skill tokens inside a skills section line.
const SKILL_SEPARATORS: &[char] = &[',', ';', '|', '•', '·', '▪', '\t'];

/// Bullet markers stripped from the start of a token.
const BULLET_PREFIXES: &[char] = &['-', '*', '•', '·', '▪', '–', '—', '>', '+'];

/// A sub-label ("Languages: Python, Go") is at most this many words.
const MAX_SUB_LABEL_WORDS: usize = 3;

/// Requirement bullets shorter than this are fragments, not requirements.
const MIN_KEY_REQUIREMENT_CHARS: usize = 11;
const MAX_KEY_REQUIREMENTS: usize = 10;

/// Lines mentioning any of these are credential requirements wherever they appear.
const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "ph.d", "degree", "diploma"];

/// Posting sections that state requirements.
const REQUIREMENT_SECTIONS: &[SectionKind] = &[SectionKind::Skills, SectionKind::Qualifications];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    JobPosting,
}

/// Structured facts pulled from one document. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub kind: DocumentKind,
    pub skills: BTreeSet<CanonicalSkill>,
    /// Job postings only: skills the posting asks for.
    pub required_skills: BTreeSet<CanonicalSkill>,
    /// Job postings only: nice-to-have skills not already required.
    pub preferred_skills: BTreeSet<CanonicalSkill>,
    pub experience_entries: Vec<String>,
    pub education_entries: Vec<String>,
    pub project_entries: Vec<String>,
    pub responsibilities: Vec<String>,
    /// Job postings only: degrees and credentials asked for.
    pub qualifications: Vec<String>,
    pub benefits: Vec<String>,
    /// Job postings only: the first bulleted requirement lines, verbatim.
    pub key_requirements: Vec<String>,
    pub summary: Option<String>,
    /// Job postings only: the "About us" blurb.
    pub company_description: Option<String>,
    pub job_title: String,
    pub company_name: String,
    pub job_type: String,
    pub experience_level: String,
    pub contact: ContactInfo,
}

impl StructuredDocument {
    pub fn empty(kind: DocumentKind) -> Self {
        Self {
            kind,
            skills: BTreeSet::new(),
            required_skills: BTreeSet::new(),
            preferred_skills: BTreeSet::new(),
            experience_entries: Vec::new(),
            education_entries: Vec::new(),
            project_entries: Vec::new(),
            responsibilities: Vec::new(),
            qualifications: Vec::new(),
            benefits: Vec::new(),
            key_requirements: Vec::new(),
            summary: None,
            company_description: None,
            job_title: NOT_SPECIFIED.to_string(),
            company_name: NOT_SPECIFIED.to_string(),
            job_type: NOT_SPECIFIED.to_string(),
            experience_level: NOT_SPECIFIED.to_string(),
            contact: ContactInfo::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

pub fn extract(taxonomy: &SkillTaxonomy, raw_text: &str, kind: DocumentKind) -> StructuredDocument {
    let mut doc = StructuredDocument::empty(kind);
    if raw_text.trim().is_empty() {
        return doc;
    }

    let sections = sections::segment(raw_text, kind);
    let sectioned_skills = skills_from_sections(taxonomy, &sections, REQUIREMENT_SECTIONS);

    // No usable skills section: scan the whole text. Incidental words can produce
    // false positives here ("containers" → Docker); recall matters more.
    let primary_skills = if sectioned_skills.is_empty() {
        taxonomy.scan(&text_outside(&sections, SectionKind::Preferred))
    } else {
        sectioned_skills
    };

    let summary_lines = lines_of(&sections, SectionKind::Summary);
    if !summary_lines.is_empty() {
        doc.summary = Some(summary_lines.join(" "));
    }

    match kind {
        DocumentKind::Resume => {
            doc.skills = primary_skills;
            doc.experience_entries = lines_of(&sections, SectionKind::Experience);
            doc.education_entries = lines_of(&sections, SectionKind::Education);
            doc.project_entries = lines_of(&sections, SectionKind::Projects);
            doc.contact = labels::contact_info(raw_text);
        }
        DocumentKind::JobPosting => {
            let preferred = skills_from_sections(taxonomy, &sections, &[SectionKind::Preferred]);
            doc.preferred_skills = preferred.difference(&primary_skills).cloned().collect();
            doc.skills = primary_skills.union(&preferred).cloned().collect();
            doc.required_skills = primary_skills;
            doc.responsibilities = lines_of(&sections, SectionKind::Responsibilities);
            doc.qualifications = qualifications(&sections);
            doc.benefits = lines_of(&sections, SectionKind::Benefits);
            doc.key_requirements = key_requirements(&sections);

            let company_lines = lines_of(&sections, SectionKind::Company);
            if !company_lines.is_empty() {
                doc.company_description = Some(company_lines.join(" "));
            }

            let or_default = |value: Option<String>| value.unwrap_or_else(|| NOT_SPECIFIED.to_string());
            doc.job_title = or_default(labels::job_title(raw_text));
            doc.company_name = or_default(labels::company_name(raw_text, taxonomy));
            doc.job_type = or_default(labels::job_type(raw_text));
            doc.experience_level = or_default(labels::experience_level(raw_text));
        }
    }

    tracing::debug!(
        kind = ?doc.kind,
        skills = doc.skills.len(),
        required = doc.required_skills.len(),
        experience = doc.experience_entries.len(),
        education = doc.education_entries.len(),
        "Document extracted"
    );

    doc
}

/// Canonical skills listed in every section of a `wanted` kind.
fn skills_from_sections(
    taxonomy: &SkillTaxonomy,
    sections: &[Section<'_>],
    wanted: &[SectionKind],
) -> BTreeSet<CanonicalSkill> {
    let mut skills = BTreeSet::new();

    for line in sections
        .iter()
        .filter(|s| wanted.contains(&s.kind))
        .flat_map(|s| s.lines.iter())
    {
        for token in skill_tokens(line) {
            match taxonomy.canonicalize(token) {
                Some(skill) => {
                    skills.insert(skill);
                }
                // "Python (Django" or "CI/CD pipelines": look for known terms inside.
                None => skills.extend(taxonomy.scan(token)),
            }
        }
    }

    skills
}

/// Splits one skills line into candidate tokens, dropping a leading sub-label.
fn skill_tokens(line: &str) -> Vec<&str> {
    let body = match line.rsplit_once(':') {
        Some((label, rest)) if label.split_whitespace().count() <= MAX_SUB_LABEL_WORDS => rest,
        _ => line,
    };

    body.split(SKILL_SEPARATORS)
        .map(|token| token.trim().trim_start_matches(BULLET_PREFIXES).trim())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Qualifications-section lines, then degree mentions from the other requirement lines.
fn qualifications(sections: &[Section<'_>]) -> Vec<String> {
    let mut found = lines_of(sections, SectionKind::Qualifications);

    for line in sections
        .iter()
        .filter(|s| s.kind == SectionKind::Skills)
        .flat_map(|s| s.lines.iter())
    {
        let lower = line.to_lowercase();
        let entry = line.trim_start_matches(BULLET_PREFIXES).trim().to_string();
        if DEGREE_KEYWORDS.iter().any(|kw| lower.contains(kw)) && !found.contains(&entry) {
            found.push(entry);
        }
    }

    found
}

/// Bulleted lines of the requirement sections, markers stripped.
fn key_requirements(sections: &[Section<'_>]) -> Vec<String> {
    sections
        .iter()
        .filter(|s| REQUIREMENT_SECTIONS.contains(&s.kind))
        .flat_map(|s| s.lines.iter())
        .filter(|line| line.starts_with(BULLET_PREFIXES))
        .map(|line| line.trim_start_matches(BULLET_PREFIXES).trim())
        .filter(|line| line.chars().count() >= MIN_KEY_REQUIREMENT_CHARS)
        .take(MAX_KEY_REQUIREMENTS)
        .map(str::to_string)
        .collect()
}

fn lines_of(sections: &[Section<'_>], wanted: SectionKind) -> Vec<String> {
    sections
        .iter()
        .filter(|s| s.kind == wanted)
        .flat_map(|s| s.lines.iter().map(|line| line.to_string()))
        .collect()
}

fn text_outside(sections: &[Section<'_>], excluded: SectionKind) -> String {
    sections
        .iter()
        .filter(|s| s.kind != excluded)
        .flat_map(|s| s.lines.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}
