//! Skill Taxonomy — canonical skill names, their aliases, and the lookups built on them.
//!
//! Loaded once at startup and shared read-only as `Arc<SkillTaxonomy>`.
//! Every lookup is a precomputed hash probe on a normalized key; canonical names
//! are checked before aliases.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default taxonomy compiled into the binary. Override with `SKILL_TAXONOMY_PATH`.
const BUILTIN_TAXONOMY: &str = include_str!("../../data/skill_taxonomy.json");

/// Characters stripped from both ends of a raw token before lookup.
const EDGE_PUNCTUATION: &[char] = &[
    ',', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '!', '?', '*', '•', '·', '▪',
    '-', '–', '—', '|', '/', '\\', '<', '>', '~',
];

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Taxonomy entry has an empty name")]
    EmptyName,

    #[error("Duplicate canonical skill '{0}'")]
    DuplicateSkill(String),

    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
}

/// One canonical skill and the spellings that resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTaxonomyEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub category: SkillCategory,
    /// Short or everyday-word names ("Go", "R", "Express") only match prose
    /// when written with the canonical casing. Aliases stay case-insensitive.
    #[serde(default)]
    pub case_sensitive_scan: bool,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    entries: Vec<SkillTaxonomyEntry>,
}

/// The single normalized name a skill is known by, regardless of source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalSkill(String);

impl CanonicalSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct ScanPattern {
    needle: String,
    entry: usize,
    case_sensitive: bool,
}

/// Read-only skill lookup table.
#[derive(Debug)]
pub struct SkillTaxonomy {
    entries: Vec<SkillTaxonomyEntry>,
    canonical_index: HashMap<String, usize>,
    alias_index: HashMap<String, usize>,
    /// Longest needle first, so "machine learning" claims its span before "ml" or "learning".
    scan_patterns: Vec<ScanPattern>,
}

// ────────────────────────────────────────────────────────────────────────────
// Construction
// ────────────────────────────────────────────────────────────────────────────

impl SkillTaxonomy {
    /// The embedded default taxonomy.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::from_json(BUILTIN_TAXONOMY)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = serde_json::from_str(raw)?;
        Self::from_entries(file.entries)
    }

    /// Builds the lookup indexes and enforces the one-alias-one-skill invariant.
    pub fn from_entries(mut entries: Vec<SkillTaxonomyEntry>) -> Result<Self, TaxonomyError> {
        let mut canonical_index = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.name = entry.name.split_whitespace().collect::<Vec<_>>().join(" ");
            let key = normalize_token(&entry.name);
            if key.is_empty() {
                return Err(TaxonomyError::EmptyName);
            }
            if canonical_index.insert(key, idx).is_some() {
                return Err(TaxonomyError::DuplicateSkill(entry.name.clone()));
            }
        }

        let names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
        let mut alias_index: HashMap<String, usize> = HashMap::new();

        for (idx, entry) in entries.iter_mut().enumerate() {
            let own_key = normalize_token(&entry.name);
            let mut aliases = Vec::with_capacity(entry.aliases.len());

            for alias in &entry.aliases {
                let key = normalize_token(alias);
                if key.is_empty() || key == own_key || aliases.contains(&key) {
                    continue;
                }
                let clash = canonical_index
                    .get(&key)
                    .or_else(|| alias_index.get(&key))
                    .copied();
                if let Some(other) = clash.filter(|&other| other != idx) {
                    return Err(TaxonomyError::AmbiguousAlias {
                        alias: key,
                        first: names[other].clone(),
                        second: entry.name.clone(),
                    });
                }
                alias_index.insert(key.clone(), idx);
                aliases.push(key);
            }

            entry.aliases = aliases;
        }

        let scan_patterns = build_scan_patterns(&entries);

        Ok(Self {
            entries,
            canonical_index,
            alias_index,
            scan_patterns,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_scan_patterns(entries: &[SkillTaxonomyEntry]) -> Vec<ScanPattern> {
    let mut patterns = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let canonical = if entry.case_sensitive_scan {
            entry.name.clone()
        } else {
            fold_case(&trim_token(&entry.name))
        };
        patterns.push(ScanPattern {
            needle: canonical,
            entry: idx,
            case_sensitive: entry.case_sensitive_scan,
        });
        for alias in &entry.aliases {
            patterns.push(ScanPattern {
                needle: fold_case(alias),
                entry: idx,
                case_sensitive: false,
            });
        }
    }

    patterns.sort_by(|a, b| {
        b.needle
            .len()
            .cmp(&a.needle.len())
            .then_with(|| a.needle.cmp(&b.needle))
    });
    patterns
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

impl SkillTaxonomy {
    /// Resolves a free-text token to its canonical skill.
    ///
    /// Case-insensitive; edge punctuation and surrounding whitespace are ignored.
    /// Returns `None` for anything that is not a known skill.
    pub fn canonicalize(&self, raw_token: &str) -> Option<CanonicalSkill> {
        let key = normalize_token(raw_token);
        if key.is_empty() {
            return None;
        }
        self.canonical_index
            .get(&key)
            .or_else(|| self.alias_index.get(&key))
            .map(|&idx| CanonicalSkill(self.entries[idx].name.clone()))
    }

    pub fn category(&self, skill: &CanonicalSkill) -> Option<SkillCategory> {
        self.canonical_index
            .get(&normalize_token(skill.as_str()))
            .map(|&idx| self.entries[idx].category)
    }

    /// Finds every canonical name or alias mentioned anywhere in `text`.
    ///
    /// Matches must sit on word boundaries, and a span of text is claimed by the
    /// longest pattern covering it. This is deliberately recall-oriented: an
    /// incidental word such as "containers" still yields `Docker`.
    pub fn scan(&self, text: &str) -> BTreeSet<CanonicalSkill> {
        self.mention_positions(text).into_keys().collect()
    }

    /// Byte offsets of every mention of each skill found in `text`, in order.
    ///
    /// Same matching rules as [`scan`](Self::scan): aliases count as mentions,
    /// case-sensitive entries only match their exact spelling.
    pub fn mention_positions(&self, text: &str) -> BTreeMap<CanonicalSkill, Vec<usize>> {
        let folded = fold_case(text);
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut found: BTreeMap<CanonicalSkill, Vec<usize>> = BTreeMap::new();

        for pattern in &self.scan_patterns {
            let haystack = if pattern.case_sensitive {
                text
            } else {
                folded.as_str()
            };

            for (start, matched) in haystack.match_indices(pattern.needle.as_str()) {
                let end = start + matched.len();
                if !on_word_boundary(haystack, start, end) {
                    continue;
                }
                if claimed.iter().any(|&(s, e)| start < e && s < end) {
                    continue;
                }
                claimed.push((start, end));
                found
                    .entry(CanonicalSkill(self.entries[pattern.entry].name.clone()))
                    .or_default()
                    .push(start);
            }
        }

        for positions in found.values_mut() {
            positions.sort_unstable();
        }
        found
    }
}

/// Lowercases, trims edge punctuation, and collapses internal whitespace.
/// A trailing period is also dropped ("Python." → "python"); a leading one is kept (".NET").
pub fn normalize_token(raw: &str) -> String {
    trim_token(raw).to_lowercase()
}

fn trim_token(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c))
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercases char by char, keeping any char whose lowercase form is not a single
/// char of the same byte width. Byte offsets into the result are valid in `text`.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}

pub(crate) fn on_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// `+` and `#` count as word characters so "C" never matches inside "C++" or "C#".
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::builtin().unwrap()
    }

    fn entry(name: &str, aliases: &[&str]) -> SkillTaxonomyEntry {
        SkillTaxonomyEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: SkillCategory::Technical,
            case_sensitive_scan: false,
        }
    }

    #[test]
    fn test_builtin_taxonomy_loads() {
        let t = taxonomy();
        assert!(t.len() > 100, "Expected a substantial taxonomy, got {}", t.len());
    }

    #[test]
    fn test_canonicalize_is_case_and_whitespace_insensitive() {
        let t = taxonomy();
        let expected = Some(CanonicalSkill::new("Python"));
        assert_eq!(t.canonicalize("  Python "), expected);
        assert_eq!(t.canonicalize("python"), expected);
        assert_eq!(t.canonicalize("PYTHON"), expected);
    }

    #[test]
    fn test_canonicalize_trims_punctuation() {
        let t = taxonomy();
        assert_eq!(t.canonicalize("• Docker,"), Some(CanonicalSkill::new("Docker")));
        assert_eq!(t.canonicalize("(Kubernetes)"), Some(CanonicalSkill::new("Kubernetes")));
        assert_eq!(t.canonicalize("Python."), Some(CanonicalSkill::new("Python")));
    }

    #[test]
    fn test_canonicalize_keeps_symbolic_names() {
        let t = taxonomy();
        assert_eq!(t.canonicalize("c++"), Some(CanonicalSkill::new("C++")));
        assert_eq!(t.canonicalize("C#"), Some(CanonicalSkill::new("C#")));
        assert_eq!(t.canonicalize(".net"), Some(CanonicalSkill::new(".NET")));
        assert_eq!(t.canonicalize("node.js"), Some(CanonicalSkill::new("Node.js")));
    }

    #[test]
    fn test_canonicalize_resolves_aliases() {
        let t = taxonomy();
        assert_eq!(t.canonicalize("k8s"), Some(CanonicalSkill::new("Kubernetes")));
        assert_eq!(t.canonicalize("Golang"), Some(CanonicalSkill::new("Go")));
        assert_eq!(t.canonicalize("postgres"), Some(CanonicalSkill::new("PostgreSQL")));
    }

    #[test]
    fn test_canonicalize_collapses_internal_whitespace() {
        let t = taxonomy();
        assert_eq!(
            t.canonicalize("machine    learning"),
            Some(CanonicalSkill::new("Machine Learning"))
        );
    }

    #[test]
    fn test_canonicalize_miss_returns_none() {
        let t = taxonomy();
        assert_eq!(t.canonicalize("underwater basket weaving"), None);
        assert_eq!(t.canonicalize(""), None);
        assert_eq!(t.canonicalize(" ,;- "), None);
    }

    #[test]
    fn test_duplicate_canonical_rejected() {
        let err = SkillTaxonomy::from_entries(vec![entry("Python", &[]), entry("python", &[])])
            .unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateSkill(_)));
    }

    #[test]
    fn test_alias_shared_between_entries_rejected() {
        let err = SkillTaxonomy::from_entries(vec![
            entry("JavaScript", &["js"]),
            entry("Node.js", &["JS"]),
        ])
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::AmbiguousAlias { .. }));
    }

    #[test]
    fn test_alias_colliding_with_other_canonical_rejected() {
        let err = SkillTaxonomy::from_entries(vec![
            entry("SQL", &["mysql"]),
            entry("MySQL", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::AmbiguousAlias { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SkillTaxonomy::from_entries(vec![entry("  ", &[])]).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyName));
    }

    #[test]
    fn test_aliases_stored_lowercase() {
        let t = SkillTaxonomy::from_entries(vec![entry("Kubernetes", &["  K8S "])]).unwrap();
        assert_eq!(t.canonicalize("k8s"), Some(CanonicalSkill::new("Kubernetes")));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            SkillTaxonomy::from_json("{ not json"),
            Err(TaxonomyError::Parse(_))
        ));
    }

    #[test]
    fn test_scan_finds_skills_in_prose() {
        let t = taxonomy();
        let found = t.scan("We deploy everything on Kubernetes and write services in Python.");
        assert!(found.contains(&CanonicalSkill::new("Kubernetes")));
        assert!(found.contains(&CanonicalSkill::new("Python")));
    }

    #[test]
    fn test_scan_respects_word_boundaries() {
        let t = taxonomy();
        // "javascript" must not yield Java; "scalable" must not yield Scala.
        let found = t.scan("experienced in javascript, building scalable systems");
        assert!(found.contains(&CanonicalSkill::new("JavaScript")));
        assert!(!found.contains(&CanonicalSkill::new("Java")));
        assert!(!found.contains(&CanonicalSkill::new("Scala")));
    }

    #[test]
    fn test_scan_prefers_longest_match() {
        let t = taxonomy();
        let found = t.scan("Built mobile apps with React Native");
        assert!(found.contains(&CanonicalSkill::new("React Native")));
        assert!(!found.contains(&CanonicalSkill::new("React")));
    }

    #[test]
    fn test_scan_case_sensitive_entries_ignore_lowercase_words() {
        let t = taxonomy();
        let prose = t.scan("We go the extra mile and express our ideas clearly.");
        assert!(!prose.contains(&CanonicalSkill::new("Go")));
        assert!(!prose.contains(&CanonicalSkill::new("Express")));

        let named = t.scan("Backend services are written in Go and C++.");
        assert!(named.contains(&CanonicalSkill::new("Go")));
        assert!(named.contains(&CanonicalSkill::new("C++")));
        assert!(!named.contains(&CanonicalSkill::new("C")));
    }

    #[test]
    fn test_scan_node_js_does_not_yield_javascript() {
        let t = taxonomy();
        let found = t.scan("APIs built with node.js");
        assert!(found.contains(&CanonicalSkill::new("Node.js")));
        assert!(!found.contains(&CanonicalSkill::new("JavaScript")));
    }

    #[test]
    fn test_scan_folds_non_ascii_case() {
        let t = SkillTaxonomy::from_entries(vec![entry("Réact Ñative", &["Señal"])]).unwrap();
        let found = t.scan("Shipped two apps in RÉACT ÑATIVE.");
        assert!(found.contains(&CanonicalSkill::new("Réact Ñative")));
        assert!(!t.scan("SEÑAL integrations").is_empty());
    }

    #[test]
    fn test_mention_positions_count_aliases() {
        let t = taxonomy();
        let text = "Ça marche: Kubernetes first, then k8s again.";
        let positions = t.mention_positions(text);
        let k8s = &positions[&CanonicalSkill::new("Kubernetes")];
        assert_eq!(k8s.len(), 2);
        assert_eq!(&text[k8s[0]..k8s[0] + 10], "Kubernetes");
        assert_eq!(&text[k8s[1]..k8s[1] + 3], "k8s");
    }

    #[test]
    fn test_fold_case_keeps_byte_offsets() {
        let text = "İstanbul ÇA ÑO Go";
        let folded = fold_case(text);
        assert_eq!(folded.len(), text.len());
        assert!(folded.ends_with("ça ño go"));
    }

    #[test]
    fn test_category_lookup() {
        let t = taxonomy();
        assert_eq!(
            t.category(&CanonicalSkill::new("Leadership")),
            Some(SkillCategory::Soft)
        );
        assert_eq!(
            t.category(&CanonicalSkill::new("Docker")),
            Some(SkillCategory::Technical)
        );
        assert_eq!(t.category(&CanonicalSkill::new("Basket Weaving")), None);
    }
}
