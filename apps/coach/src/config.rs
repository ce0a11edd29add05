use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::DEFAULT_API_URL;
use crate::tier::UserTier;

const DEFAULT_QUESTION_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_EVALUATION_MODEL: &str = "gemini-3-pro-preview";

/// Coach configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub question_model: String,
    pub evaluation_model: String,
    pub llm_timeout: Duration,
    pub user_tier: UserTier,
    pub free_simulation_quota: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_api_url: or_default("GEMINI_API_URL", DEFAULT_API_URL),
            question_model: or_default("QUESTION_MODEL", DEFAULT_QUESTION_MODEL),
            evaluation_model: or_default("EVALUATION_MODEL", DEFAULT_EVALUATION_MODEL),
            llm_timeout: Duration::from_secs(
                or_default("LLM_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            user_tier: or_default("USER_TIER", "free")
                .parse::<UserTier>()
                .map_err(|e| anyhow!("USER_TIER: {e}"))?,
            free_simulation_quota: or_default("FREE_SIMULATION_QUOTA", "3")
                .parse::<u32>()
                .context("FREE_SIMULATION_QUOTA must be a non-negative integer")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.gemini_api_url, DEFAULT_API_URL);
        assert_eq!(config.question_model, "gemini-3-flash-preview");
        assert_eq!(config.evaluation_model, "gemini-3-pro-preview");
        assert_eq!(config.llm_timeout, Duration::from_secs(120));
        assert_eq!(config.user_tier, UserTier::Free);
        assert_eq!(config.free_simulation_quota, 3);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(Config::from_lookup(lookup(&[("GEMINI_API_KEY", " ")])).is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("USER_TIER", "pro"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("FREE_SIMULATION_QUOTA", "0"),
        ]))
        .unwrap();
        assert_eq!(config.user_tier, UserTier::Pro);
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
        assert_eq!(config.free_simulation_quota, 0);
    }

    #[test]
    fn test_bad_tier_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("USER_TIER", "gold"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("USER_TIER"));
    }
}
