//! Splits raw document text into line-bounded sections keyed by a small, fixed
//! heading vocabulary.

use serde::{Deserialize, Serialize};

use crate::analysis::extractor::DocumentKind;

/// Which structured field a section feeds. `Preamble` and `Other` feed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Preamble,
    Skills,
    Preferred,
    Experience,
    Education,
    Summary,
    Projects,
    Responsibilities,
    /// Job postings: degree and credential requirements. Also a skills source.
    Qualifications,
    Benefits,
    /// Job postings: "About us" and similar blurbs about the employer.
    Company,
    Other,
}

/// A run of non-empty content lines under one heading, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub lines: Vec<&'a str>,
}

const HEADINGS: &[(&str, SectionKind)] = &[
    ("skills", SectionKind::Skills),
    ("skill set", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("core skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("tech stack", SectionKind::Skills),
    ("tools and technologies", SectionKind::Skills),
    ("requirements", SectionKind::Skills),
    ("job requirements", SectionKind::Skills),
    ("required skills", SectionKind::Skills),
    ("technical requirements", SectionKind::Skills),
    ("minimum requirements", SectionKind::Skills),
    ("must have", SectionKind::Skills),
    ("must haves", SectionKind::Skills),
    ("what you'll need", SectionKind::Skills),
    ("what you need", SectionKind::Skills),
    ("what we're looking for", SectionKind::Skills),
    ("preferred", SectionKind::Preferred),
    ("preferred skills", SectionKind::Preferred),
    ("preferred qualifications", SectionKind::Preferred),
    ("nice to have", SectionKind::Preferred),
    ("nice to haves", SectionKind::Preferred),
    ("bonus", SectionKind::Preferred),
    ("bonus points", SectionKind::Preferred),
    ("desired skills", SectionKind::Preferred),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("relevant experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("education and training", SectionKind::Education),
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("overview", SectionKind::Summary),
    ("about us", SectionKind::Company),
    ("about the company", SectionKind::Company),
    ("who we are", SectionKind::Company),
    ("company description", SectionKind::Company),
    ("company overview", SectionKind::Company),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("key projects", SectionKind::Projects),
    ("portfolio", SectionKind::Projects),
    ("responsibilities", SectionKind::Responsibilities),
    ("key responsibilities", SectionKind::Responsibilities),
    ("duties", SectionKind::Responsibilities),
    ("what you'll do", SectionKind::Responsibilities),
    ("what you will do", SectionKind::Responsibilities),
    ("the role", SectionKind::Responsibilities),
    ("your role", SectionKind::Responsibilities),
    ("in this role", SectionKind::Responsibilities),
    ("benefits", SectionKind::Benefits),
    ("perks", SectionKind::Benefits),
    ("benefits and perks", SectionKind::Benefits),
    ("perks and benefits", SectionKind::Benefits),
    ("what we offer", SectionKind::Benefits),
    ("we offer", SectionKind::Benefits),
    ("compensation", SectionKind::Benefits),
    ("compensation and benefits", SectionKind::Benefits),
    ("why join us", SectionKind::Benefits),
    ("certifications", SectionKind::Other),
    ("awards", SectionKind::Other),
    ("interests", SectionKind::Other),
    ("hobbies", SectionKind::Other),
    ("references", SectionKind::Other),
    ("contact", SectionKind::Other),
];

/// Headings whose meaning depends on the document: a posting's qualifications are
/// its requirements, a résumé's are its credentials.
const QUALIFICATION_HEADINGS: &[&str] = &[
    "qualifications",
    "minimum qualifications",
    "basic qualifications",
    "required qualifications",
    "education requirements",
    "educational requirements",
];

/// Longest heading prefix considered for an inline `Heading: content` line.
const MAX_INLINE_HEADING_WORDS: usize = 4;

/// Longest standalone `Label:` line kept inside a skills list ("Cloud Platforms:").
const MAX_SUB_LABEL_WORDS: usize = 3;

/// Looks up a heading in the fixed vocabulary. Case, markup and a trailing colon are ignored.
pub fn known_heading(line: &str, kind: DocumentKind) -> Option<SectionKind> {
    let key = normalize_heading(line);
    if key.is_empty() {
        return None;
    }
    if QUALIFICATION_HEADINGS.contains(&key.as_str()) {
        return Some(match kind {
            DocumentKind::JobPosting => SectionKind::Qualifications,
            DocumentKind::Resume => SectionKind::Education,
        });
    }
    HEADINGS
        .iter()
        .find(|(heading, _)| *heading == key)
        .map(|(_, section)| *section)
}

/// Splits `text` into sections. Content before the first heading lands in `Preamble`.
pub fn segment(text: &str, kind: DocumentKind) -> Vec<Section<'_>> {
    let mut sections = vec![Section {
        kind: SectionKind::Preamble,
        lines: Vec::new(),
    }];

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let current = sections.last().map_or(SectionKind::Preamble, |s| s.kind);
        match classify_line(line, kind, current) {
            LineRole::Heading(section_kind, inline) => {
                sections.push(Section {
                    kind: section_kind,
                    lines: inline.into_iter().collect(),
                });
            }
            LineRole::Content => {
                if let Some(current) = sections.last_mut() {
                    current.lines.push(line);
                }
            }
        }
    }

    sections
}

#[derive(Debug, PartialEq)]
enum LineRole<'a> {
    /// A heading, with any content that followed it on the same line.
    Heading(SectionKind, Option<&'a str>),
    Content,
}

fn classify_line(line: &str, kind: DocumentKind, current: SectionKind) -> LineRole<'_> {
    if let Some(section_kind) = known_heading(line, kind) {
        return LineRole::Heading(section_kind, None);
    }

    if let Some((head, rest)) = line.split_once(':') {
        if head.split_whitespace().count() <= MAX_INLINE_HEADING_WORDS {
            if let Some(section_kind) = known_heading(head, kind) {
                let rest = rest.trim();
                let inline = (!rest.is_empty()).then_some(rest);
                return LineRole::Heading(section_kind, inline);
            }
        }
    }

    // "Languages:" on its own line groups the skills below it; it does not end the list.
    if matches!(current, SectionKind::Skills | SectionKind::Preferred) && is_sub_label(line) {
        return LineRole::Content;
    }

    if looks_like_unknown_heading(line) {
        return LineRole::Heading(SectionKind::Other, None);
    }

    LineRole::Content
}

/// Short title-like lines outside the vocabulary ("VOLUNTEER WORK", "Publications:")
/// close the current section so its content does not bleed into the next field.
fn looks_like_unknown_heading(line: &str) -> bool {
    let words = line.split_whitespace().count();

    if let Some(head) = line.strip_suffix(':') {
        return (1..=5).contains(&words) && !head.contains([',', '.', ';']);
    }

    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    (2..=5).contains(&words)
        && letters.len() >= 4
        && letters.iter().all(|c| c.is_uppercase())
        && line
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '&' | '-' | '\''))
}

fn is_sub_label(line: &str) -> bool {
    line.strip_suffix(':').is_some_and(|head| {
        (1..=MAX_SUB_LABEL_WORDS).contains(&head.split_whitespace().count())
            && !head.contains([',', '.', ';'])
    })
}

fn normalize_heading(line: &str) -> String {
    let trimmed = line
        .trim()
        .trim_start_matches(['#', '*', '=', '_', '-', '•'])
        .trim_end_matches(['#', '*', '=', '_', ':', '-'])
        .trim();
    trimmed
        .replace(['’', '‘'], "'")
        .replace('&', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
