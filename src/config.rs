use crate::i18n::{AssemblyStrategy, LanguageCode, MissingLanguagePolicy, DEFAULT_LANGUAGE};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_dir: PathBuf,
    pub default_language: LanguageCode,
    pub missing_language_policy: MissingLanguagePolicy,
    pub assembly_strategy: AssemblyStrategy,

    // Server
    pub port: u16,

    // Security
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translations
            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("translations")),
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| LanguageCode::new(v.trim()))
                .unwrap_or_else(|| LanguageCode::new(DEFAULT_LANGUAGE)),
            missing_language_policy: match std::env::var("MISSING_LANGUAGE_POLICY") {
                Ok(v) => v.parse().context("Invalid MISSING_LANGUAGE_POLICY")?,
                Err(_) => MissingLanguagePolicy::default(),
            },
            assembly_strategy: match std::env::var("ASSEMBLY_STRATEGY") {
                Ok(v) => v.parse().context("Invalid ASSEMBLY_STRATEGY")?,
                Err(_) => AssemblyStrategy::default(),
            },

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Security - optional key protecting the metrics endpoint
            api_key: std::env::var("API_KEY").ok().filter(|v| !v.is_empty()),
        })
    }
}
