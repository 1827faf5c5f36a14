//! Single-valued facts pulled out of raw document text: job title, company,
//! job type, experience level and contact details.
//!
//! Every function returns `None` when nothing matches; the extractor decides the default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::extractor::DocumentKind;
use crate::analysis::sections::known_heading;
use crate::analysis::taxonomy::SkillTaxonomy;

/// Contact details found near the top of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// Lines inspected for a bare job title or a candidate name.
const TITLE_SCAN_LINES: usize = 3;
const NAME_SCAN_LINES: usize = 5;
const MAX_TITLE_LEN: usize = 100;

/// Words that open a "join ..." or "... is a" phrase without naming the company.
const COMPANY_STOPWORDS: &[&str] = &[
    "Our", "Us", "The", "A", "An", "This", "We", "It", "There", "That", "What", "Experience",
    "Knowledge", "Travel", "Familiarity", "Certification", "Relocation",
];

static TITLE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:job[ \t]+title|position(?:[ \t]+title)?|role|title)[ \t]*(?::|[–-][ \t])[ \t]*([^\r\n]+)")
        .unwrap()
});

static ROLE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:engineer|developer|manager|analyst|specialist|director|coordinator|lead|senior|junior|scientist|designer|architect|consultant|intern|administrator)\b")
        .unwrap()
});

static COMPANY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:company(?:[ \t]+name)?|organi[sz]ation|employer|hiring[ \t]+company)[ \t]*:[ \t]*([^\r\n]+)")
        .unwrap()
});

static COMPANY_IS_A: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Z][\w&.'-]*(?:[ \t]+[A-Z][\w&.'-]*){0,4})[ \t]+is[ \t]+(?:a|an|the)\b")
        .unwrap()
});

static COMPANY_JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[Jj]oin|[Ww]ork[ \t]+at|[Ee]mployment[ \t]+with)[ \t]+([A-Z][\w&.'-]*(?:[ \t]+[A-Z][\w&.'-]*){0,3})")
        .unwrap()
});

static JOB_TYPE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:job|employment|position|contract)[ \t]+type[ \t]*:[ \t]*([^\r\n]+)")
        .unwrap()
});

/// Checked in order; the first hit wins, so employment type beats location.
static JOB_TYPES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Full-time", r"(?i)\bfull[\s-]?time\b"),
        ("Part-time", r"(?i)\bpart[\s-]?time\b"),
        ("Contract", r"(?i)\bcontract\b"),
        ("Freelance", r"(?i)\bfreelance\b"),
        ("Temporary", r"(?i)\btemporary\b"),
        ("Internship", r"(?i)\binternship\b"),
        ("Remote", r"(?i)\bremote\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

static LEVEL_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:experience[ \t]+level|seniority(?:[ \t]+level)?|career[ \t]+level)[ \t]*:[ \t]*([^\r\n]+)")
        .unwrap()
});

static YEARS_OF_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?:[ \t]*[-–][ \t]*\d{1,2})?\+?)[ \t]*\+?[ \t]*(?:years?|yrs?)\b[^.\n]{0,40}?\bexperience\b")
        .unwrap()
});

static MINIMUM_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:minimum|at[ \t]+least)[ \t]+(?:of[ \t]+)?(\d{1,2}\+?)[ \t]*(?:years?|yrs?)\b")
        .unwrap()
});

static SENIORITY: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Senior", r"(?i)\bsenior\b"),
        ("Mid-level", r"(?i)\bmid[\s-]?level\b"),
        ("Junior", r"(?i)\bjunior\b"),
        ("Entry-level", r"(?i)\bentry[\s-]?level\b"),
        ("Principal", r"(?i)\bprincipal\b"),
        ("Intern", r"(?i)\bintern\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap()
});

static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());

static GITHUB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Job posting labels
// ────────────────────────────────────────────────────────────────────────────

/// "Job Title: ..." style label first, then a role-like line at the very top.
pub fn job_title(text: &str) -> Option<String> {
    if let Some(title) = first_capture(&TITLE_LABEL, text) {
        return Some(title);
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(TITLE_SCAN_LINES)
        .find(|line| line.len() <= MAX_TITLE_LEN && ROLE_WORD.is_match(line))
        .map(|line| clean_value(line.trim_matches(['#', '*'])))
        .filter(|title| !title.is_empty())
}

/// Label first, then "join X", then "X is a ...". Prose captures that name a
/// known skill ("AWS is a plus") or open with a generic word are skipped.
pub fn company_name(text: &str, taxonomy: &SkillTaxonomy) -> Option<String> {
    if let Some(company) = first_capture(&COMPANY_LABEL, text) {
        return Some(company);
    }

    [&*COMPANY_JOIN, &*COMPANY_IS_A].into_iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| clean_value(m.as_str()))
            .find(|name| {
                let first_word = name.split_whitespace().next().unwrap_or_default();
                !name.is_empty()
                    && !COMPANY_STOPWORDS.contains(&first_word)
                    && taxonomy.canonicalize(name).is_none()
            })
    })
}

pub fn job_type(text: &str) -> Option<String> {
    first_capture(&JOB_TYPE_LABEL, text).or_else(|| {
        JOB_TYPES
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(label, _)| label.to_string())
    })
}

/// Explicit label, then "N+ years of experience", then a seniority keyword.
pub fn experience_level(text: &str) -> Option<String> {
    if let Some(level) = first_capture(&LEVEL_LABEL, text) {
        return Some(level);
    }

    let years = YEARS_OF_EXPERIENCE
        .captures(text)
        .or_else(|| MINIMUM_YEARS.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| {
            let compact: String = m.as_str().split_whitespace().collect();
            format!("{compact} years")
        });
    if years.is_some() {
        return years;
    }

    SENIORITY
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| label.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé contact details
// ────────────────────────────────────────────────────────────────────────────

pub fn contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        name: candidate_name(text),
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE.find(text).map(|m| m.as_str().trim().to_string()),
        linkedin: LINKEDIN.find(text).map(|m| m.as_str().to_string()),
        github: GITHUB.find(text).map(|m| m.as_str().to_string()),
    }
}

/// A short, purely alphabetic line among the first few lines that is not a heading.
fn candidate_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            (2..=4).contains(&words.len())
                && words.iter().all(|w| {
                    w.chars()
                        .filter(|c| !matches!(c, '.' | '-' | '\''))
                        .all(char::is_alphabetic)
                })
                && known_heading(line, DocumentKind::Resume).is_none()
        })
        .map(str::to_string)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_value(m.as_str()))
        .filter(|value| !value.is_empty())
}

fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_end_matches([',', ';', '.', ':'])
        .trim()
        .to_string()
}
