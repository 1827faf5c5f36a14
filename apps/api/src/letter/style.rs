//! Each template style maps to a framing sentence and a set of writing
//! instructions fed into the letter prompt.
//!
//! Unknown style names fall back to `Professional`; the request never fails on them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStyle {
    #[default]
    Professional,
    Creative,
    Technical,
    EntryLevel,
}

/// Catalog entry served by `GET /api/templates`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateStyle,
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
}

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 4] = [
        TemplateStyle::Professional,
        TemplateStyle::Creative,
        TemplateStyle::Technical,
        TemplateStyle::EntryLevel,
    ];

    /// Parses a form value such as `"entry_level"` or `"Entry Level"`.
    /// Anything unrecognized (including empty) becomes `Professional`.
    pub fn from_param(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match key.as_str() {
            "creative" => Self::Creative,
            "technical" => Self::Technical,
            "entry_level" => Self::EntryLevel,
            _ => Self::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Creative => "creative",
            Self::Technical => "technical",
            Self::EntryLevel => "entry_level",
        }
    }

    pub fn info(&self) -> TemplateInfo {
        let (name, description, best_for) = match self {
            Self::Professional => (
                "Professional",
                "Traditional, formal cover letter suitable for corporate environments",
                "Corporate positions, traditional industries, formal applications",
            ),
            Self::Creative => (
                "Creative",
                "Engaging and creative tone while maintaining professionalism",
                "Creative industries, startups, marketing roles",
            ),
            Self::Technical => (
                "Technical",
                "Focuses on technical skills and achievements",
                "Software development, engineering, technical roles",
            ),
            Self::EntryLevel => (
                "Entry Level",
                "Emphasizes potential, education, and eagerness to learn",
                "Recent graduates, career changers, first-time job seekers",
            ),
        };
        TemplateInfo {
            id: *self,
            name,
            description,
            best_for,
        }
    }

    /// Opening line of the prompt: what kind of letter to write.
    pub fn framing(&self) -> &'static str {
        match self {
            Self::Professional => "Write a professional, formal cover letter",
            Self::Creative => {
                "Write a creative and engaging cover letter that stays professional"
            }
            Self::Technical => {
                "Write a technical cover letter focused on engineering depth and results"
            }
            Self::EntryLevel => {
                "Write an entry-level cover letter that emphasizes potential and eagerness to learn"
            }
        }
    }

    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            Self::Professional => &[
                "Highlight the candidate skills that match the job requirements",
                "Show enthusiasm for the role and the company",
                "Cite specific examples from the experience entries when possible",
                "Keep it to 3-4 well-structured paragraphs with a professional closing",
                "End with a clear call to action",
            ],
            Self::Creative => &[
                "Open with an attention-grabbing first sentence",
                "Tell a short, concrete story drawn from the experience or projects",
                "Let personality and passion for the field show",
                "Stay concise and end with a memorable closing",
            ],
            Self::Technical => &[
                "Lead with the technical qualifications that match the requirements",
                "Name specific technologies and frameworks the candidate has used",
                "Include quantifiable results where the resume provides them",
                "Show problem-solving ability with one concrete project or implementation",
            ],
            Self::EntryLevel => &[
                "Emphasize eagerness to learn and grow",
                "Highlight relevant education, coursework and projects",
                "Mention internships or any relevant experience",
                "Focus on potential and transferable skills",
            ],
        }
    }

    /// Whether the prompt should list the candidate's education entries.
    pub fn includes_education(&self) -> bool {
        matches!(self, Self::EntryLevel | Self::Professional)
    }

    /// Whether the prompt should narrow the skill list to technical skills.
    pub fn technical_focus(&self) -> bool {
        matches!(self, Self::Technical)
    }
}

pub fn catalog() -> Vec<TemplateInfo> {
    TemplateStyle::ALL.iter().map(TemplateStyle::info).collect()
}
