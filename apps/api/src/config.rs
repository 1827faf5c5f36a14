use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// `["*"]` means any origin.
    pub allowed_origins: Vec<String>,
    /// Custom taxonomy JSON; `None` uses the embedded default.
    pub skill_taxonomy_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Config {
            anthropic_api_key: optional("ANTHROPIC_API_KEY").with_context(|| {
                "Required environment variable 'ANTHROPIC_API_KEY' is not set".to_string()
            })?,
            port: optional("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(DEFAULT_PORT),
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            allowed_origins: optional("ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            skill_taxonomy_path: optional("SKILL_TAXONOMY_PATH").map(PathBuf::from),
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert!(config.skill_taxonomy_path.is_none());
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
        assert!(config_from(&[("ANTHROPIC_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides_parsed() {
        let config = config_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("PORT", "9000"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("SKILL_TAXONOMY_PATH", "/etc/skills.json"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.skill_taxonomy_path, Some(PathBuf::from("/etc/skills.json")));
    }

    #[test]
    fn test_wildcard_origin() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "k"), ("ALLOWED_ORIGINS", "*")]).unwrap();
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_bad_port_fails() {
        assert!(config_from(&[("ANTHROPIC_API_KEY", "k"), ("PORT", "eighty")]).is_err());
    }
}
