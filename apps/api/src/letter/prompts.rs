// All LLM prompt constants for the Letter module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for cover letter generation.
pub const LETTER_SYSTEM: &str = "You are an experienced career coach who writes concise, \
    specific cover letters. You write in first person as the candidate. \
    You never invent facts about the candidate.";

/// Cover letter prompt template.
/// Replace: {framing}, {candidate_name}, {job_title}, {company_name},
///          {grounding_instruction}, {summary}, {skills}, {matching_skills},
///          {experience}, {education}, {projects}, {required_skills},
///          {missing_skills}, {responsibilities}, {experience_level},
///          {custom_message}, {instructions}, {plain_text_instruction}
pub const LETTER_PROMPT_TEMPLATE: &str = r#"{framing} for {candidate_name} applying for the {job_title} position at {company_name}.

{grounding_instruction}

CANDIDATE INFORMATION:
- Summary: {summary}
- Skills: {skills}
- Skills matching this job: {matching_skills}
- Experience: {experience}
- Education: {education}
- Projects: {projects}

JOB INFORMATION:
- Required skills: {required_skills}
- Required skills the candidate has not listed: {missing_skills}
- Key responsibilities: {responsibilities}
- Experience level: {experience_level}
{custom_message}
INSTRUCTIONS:
{instructions}
- Do not claim skills from the "not listed" group; you may mention willingness to learn them.
- Keep it under 400 words.
- Sign off with the candidate's name.

{plain_text_instruction}"#;

/// Section appended when the user supplies a personal note.
/// Replace: {message}
pub const CUSTOM_MESSAGE_TEMPLATE: &str = "\nPERSONAL NOTE TO WORK IN NATURALLY:\n{message}\n";

/// Placeholders used when the analysis has nothing for a prompt field.
pub const FALLBACK_CANDIDATE_NAME: &str = "the candidate";
pub const FALLBACK_JOB_TITLE: &str = "open";
pub const FALLBACK_COMPANY_NAME: &str = "your company";
pub const NONE_LISTED: &str = "None listed";
