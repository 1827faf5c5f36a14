//! Skill priority ranking: orders a posting's required skills by how hard the
//! posting leans on them.
//!
//! Points per skill:
//! - 10 per mention (canonical name or alias, whole words)
//! - 20 if mentioned within the opening `EARLY_MENTION_WINDOW` bytes
//! - 30 if mentioned after a requirement marker on the same line
//!
//! Highest score first; ties broken by skill name.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::{fold_case, on_word_boundary, CanonicalSkill, SkillTaxonomy};

pub const POINTS_PER_MENTION: u32 = 10;
pub const EARLY_MENTION_BONUS: u32 = 20;
pub const REQUIREMENT_MARKER_BONUS: u32 = 30;
pub const EARLY_MENTION_WINDOW: usize = 200;

const REQUIREMENT_MARKERS: &[&str] = &["required", "must have", "must-have", "essential", "critical"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPriority {
    pub skill: CanonicalSkill,
    pub priority: u32,
    pub mentions: usize,
}

/// Mentions are found the way the taxonomy scan finds them, so "k8s" counts for
/// Kubernetes and lowercase "go" does not count for Go.
pub fn rank_skill_priorities(
    taxonomy: &SkillTaxonomy,
    required_skills: &BTreeSet<CanonicalSkill>,
    job_text: &str,
) -> Vec<SkillPriority> {
    let folded = fold_case(job_text);
    let mut mentions = taxonomy.mention_positions(job_text);

    let mut ranked: Vec<SkillPriority> = required_skills
        .iter()
        .map(|skill| {
            let positions = match mentions.remove(skill) {
                Some(positions) => positions,
                // Skills outside the taxonomy fall back to a plain name search.
                None if taxonomy.category(skill).is_none() => {
                    word_positions(&folded, &fold_case(skill.as_str()))
                }
                None => Vec::new(),
            };

            let mut priority = positions.len() as u32 * POINTS_PER_MENTION;
            if positions.iter().any(|&pos| pos < EARLY_MENTION_WINDOW) {
                priority += EARLY_MENTION_BONUS;
            }
            if positions.iter().any(|&pos| follows_requirement_marker(&folded, pos)) {
                priority += REQUIREMENT_MARKER_BONUS;
            }

            SkillPriority {
                skill: skill.clone(),
                priority,
                mentions: positions.len(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.skill.cmp(&b.skill)));
    ranked
}

/// Byte offsets of whole-word occurrences of `needle` in `haystack`.
fn word_positions(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .filter(|(start, m)| on_word_boundary(haystack, *start, start + m.len()))
        .map(|(start, _)| start)
        .collect()
}

/// True when a marker appears earlier on the line holding `pos`.
fn follows_requirement_marker(folded: &str, pos: usize) -> bool {
    let line_start = folded[..pos].rfind('\n').map_or(0, |i| i + 1);
    let before = &folded[line_start..pos];
    REQUIREMENT_MARKERS.iter().any(|marker| before.contains(marker))
}
