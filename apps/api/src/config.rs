use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::Datelike;

use crate::advisor::intent::Intent;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential is deliberately optional here: its absence is reported as
/// `MissingCredential` when the orchestrator is built, before any network call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    pub corpus_path: PathBuf,
    pub institution: String,
    pub market_year: i32,
    pub upstream_timeout_secs: u64,
    pub max_retries: u32,
    /// Intents whose validation failures degrade to a canned fallback instead of an error.
    pub fallback_intents: HashSet<Intent>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            corpus_path: PathBuf::from(env_or("ADVISOR_CORPUS_PATH", "data/prospectus.txt")),
            institution: env_or("ADVISOR_INSTITUTION", "Richfield"),
            market_year: match std::env::var("ADVISOR_MARKET_YEAR") {
                Ok(year) => year
                    .parse::<i32>()
                    .context("ADVISOR_MARKET_YEAR must be a year, e.g. 2026")?,
                Err(_) => chrono::Utc::now().year(),
            },
            upstream_timeout_secs: env_or("ADVISOR_UPSTREAM_TIMEOUT_SECS", "60")
                .parse::<u64>()
                .context("ADVISOR_UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            max_retries: env_or("ADVISOR_MAX_RETRIES", "0")
                .parse::<u32>()
                .context("ADVISOR_MAX_RETRIES must be a non-negative integer")?,
            fallback_intents: parse_intent_list(&env_or("ADVISOR_FALLBACK_INTENTS", ""))?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses a comma-separated list such as `"pivot, postgrad"`. Blank entries are skipped.
fn parse_intent_list(raw: &str) -> Result<HashSet<Intent>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Intent::from_str(name)
                .with_context(|| format!("ADVISOR_FALLBACK_INTENTS contains unknown intent '{name}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intent_list_empty_means_strict() {
        assert!(parse_intent_list("").unwrap().is_empty());
        assert!(parse_intent_list(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_intent_list_accepts_mixed_case_and_spacing() {
        let intents = parse_intent_list("Pivot, postgrad").unwrap();
        assert_eq!(intents.len(), 2);
        assert!(intents.contains(&Intent::Pivot));
        assert!(intents.contains(&Intent::Postgrad));
    }

    #[test]
    fn test_parse_intent_list_rejects_unknown_name() {
        let err = parse_intent_list("roadmap,horoscope").unwrap_err();
        assert!(err.to_string().contains("horoscope"));
    }
}
