//! Cover letter generation — orchestrates prompt → writer → post-processing.
//!
//! Flow: AnalysisRecord + TemplateStyle → build_prompt → LetterWriter →
//!       post_process → GeneratedLetter (with improvement suggestions).

use serde::Serialize;
use tracing::info;

use crate::analysis::assembler::AnalysisRecord;
use crate::analysis::extractor::NOT_SPECIFIED;
use crate::analysis::taxonomy::{CanonicalSkill, SkillCategory, SkillTaxonomy};
use crate::errors::AppError;
use crate::letter::prompts::{
    CUSTOM_MESSAGE_TEMPLATE, FALLBACK_CANDIDATE_NAME, FALLBACK_COMPANY_NAME, FALLBACK_JOB_TITLE,
    LETTER_PROMPT_TEMPLATE, LETTER_SYSTEM, NONE_LISTED,
};
use crate::letter::style::TemplateStyle;
use crate::letter::writer::LetterWriter;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};

/// Prompt budget per field. Entries beyond these are dropped, long lines truncated.
const MAX_PROMPT_SKILLS: usize = 15;
const MAX_PROMPT_ENTRIES: usize = 6;
const MAX_PROMPT_PROJECTS: usize = 3;
const MAX_PROMPT_RESPONSIBILITIES: usize = 5;
const MAX_ENTRY_CHARS: usize = 160;
const MAX_CUSTOM_MESSAGE_CHARS: usize = 1000;

/// Missing skills named in the improvement suggestion.
const SUGGESTED_MISSING_SKILLS: usize = 3;

const NAME_PLACEHOLDER: &str = "[Your Name]";
const COMPANY_PLACEHOLDER: &str = "[Company Name]";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLetter {
    pub cover_letter: String,
    pub template_used: TemplateStyle,
    pub word_count: usize,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_cover_letter(
    writer: &dyn LetterWriter,
    taxonomy: &SkillTaxonomy,
    record: &AnalysisRecord,
    style: TemplateStyle,
    custom_message: Option<&str>,
) -> Result<GeneratedLetter, AppError> {
    let prompt = build_prompt(taxonomy, record, style, custom_message);

    info!(style = style.as_str(), prompt_chars = prompt.len(), "Generating cover letter");
    let raw = writer.write_letter(&prompt, LETTER_SYSTEM).await?;

    let cover_letter = post_process(&raw, record);
    let word_count = word_count(&cover_letter);
    info!(word_count, "Cover letter generated");

    Ok(GeneratedLetter {
        cover_letter,
        template_used: style,
        word_count,
        suggestions: improvement_suggestions(record),
    })
}

/// Fills the letter template from the analysis record.
pub fn build_prompt(
    taxonomy: &SkillTaxonomy,
    record: &AnalysisRecord,
    style: TemplateStyle,
    custom_message: Option<&str>,
) -> String {
    let resume = &record.resume;
    let job = &record.job;

    let skills: Vec<&CanonicalSkill> = resume
        .skills
        .iter()
        .filter(|skill| {
            !style.technical_focus()
                || taxonomy.category(skill).unwrap_or_default() == SkillCategory::Technical
        })
        .take(MAX_PROMPT_SKILLS)
        .collect();

    let education = if style.includes_education() {
        join_entries(&resume.education_entries, MAX_PROMPT_ENTRIES)
    } else {
        NONE_LISTED.to_string()
    };

    let custom_message = custom_message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| CUSTOM_MESSAGE_TEMPLATE.replace("{message}", &truncate(m, MAX_CUSTOM_MESSAGE_CHARS)))
        .unwrap_or_default();

    let instructions = style
        .instructions()
        .iter()
        .map(|line| format!("- {line}."))
        .collect::<Vec<_>>()
        .join("\n");

    LETTER_PROMPT_TEMPLATE
        .replace("{framing}", style.framing())
        .replace(
            "{candidate_name}",
            resume.contact.name.as_deref().unwrap_or(FALLBACK_CANDIDATE_NAME),
        )
        .replace("{job_title}", specified_or(&job.job_title, FALLBACK_JOB_TITLE))
        .replace("{company_name}", specified_or(&job.company_name, FALLBACK_COMPANY_NAME))
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{summary}", resume.summary.as_deref().unwrap_or(NONE_LISTED))
        .replace("{skills}", &join_skills(skills))
        .replace("{matching_skills}", &join_skills(&record.match_result.matching_skills))
        .replace("{experience}", &join_entries(&resume.experience_entries, MAX_PROMPT_ENTRIES))
        .replace("{education}", &education)
        .replace("{projects}", &join_entries(&resume.project_entries, MAX_PROMPT_PROJECTS))
        .replace("{required_skills}", &join_skills(&job.required_skills))
        .replace("{missing_skills}", &join_skills(&record.match_result.missing_skills))
        .replace(
            "{responsibilities}",
            &join_entries(&job.responsibilities, MAX_PROMPT_RESPONSIBILITIES),
        )
        .replace("{experience_level}", &job.experience_level)
        .replace("{custom_message}", &custom_message)
        .replace("{instructions}", &instructions)
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
}

/// Trims the writer output and fills placeholders the model left in.
pub fn post_process(raw: &str, record: &AnalysisRecord) -> String {
    let mut letter = raw.trim().to_string();

    if let Some(name) = record.resume.contact.name.as_deref() {
        letter = letter.replace(NAME_PLACEHOLDER, name);
    }
    if record.job.company_name != NOT_SPECIFIED {
        letter = letter.replace(COMPANY_PLACEHOLDER, &record.job.company_name);
    }

    letter
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Suggestions for strengthening the application, independent of the letter text.
pub fn improvement_suggestions(record: &AnalysisRecord) -> Vec<String> {
    let mut suggestions = Vec::new();

    let missing: Vec<&str> = record
        .match_result
        .missing_skills
        .iter()
        .take(SUGGESTED_MISSING_SKILLS)
        .map(CanonicalSkill::as_str)
        .collect();
    if !missing.is_empty() {
        suggestions.push(format!(
            "Consider highlighting experience with: {}",
            missing.join(", ")
        ));
    }
    if record.resume.experience_entries.is_empty() {
        suggestions.push("Consider adding more specific work experience examples".to_string());
    }
    if record.resume.education_entries.is_empty() {
        suggestions.push("Ensure educational background is clearly stated".to_string());
    }

    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn specified_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value == NOT_SPECIFIED {
        fallback
    } else {
        value
    }
}

fn join_skills<'a>(skills: impl IntoIterator<Item = &'a CanonicalSkill>) -> String {
    let joined = skills
        .into_iter()
        .map(CanonicalSkill::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NONE_LISTED.to_string()
    } else {
        joined
    }
}

fn join_entries(entries: &[String], limit: usize) -> String {
    if entries.is_empty() {
        return NONE_LISTED.to_string();
    }
    entries
        .iter()
        .take(limit)
        .map(|entry| truncate(entry, MAX_ENTRY_CHARS))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Char-boundary-safe truncation with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
