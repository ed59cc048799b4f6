//! Harness configuration.
//!
//! Defaults target the public demo service. `from_env` lets a run point at
//! another deployment (or a local mock), move the log directory, or replay
//! a previous ISBN draw by fixing the seed.

use std::path::PathBuf;

use bookstore_core::Credentials;

use crate::error::HarnessError;

pub const DEFAULT_BASE_URL: &str = "https://demoqa.com";
pub const REFERENCE_ISBN: &str = "9781449325862";
pub const UNKNOWN_ISBN: &str = "1";

/// A catalog entry whose metadata never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFact {
    pub isbn: String,
    pub pages: u32,
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub base_url: String,
    pub log_dir: PathBuf,
    /// Seed for ISBN selection. `None` draws a fresh one per run.
    pub seed: Option<u64>,
    pub reference_isbn: String,
    pub unknown_isbn: String,
    pub fixed_fact: FixedFact,
    /// An account that already exists on the service and is never deleted.
    pub standing_account: Credentials,
    /// The account created once for the collection suite.
    pub shared_account: Credentials,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_dir: PathBuf::from("logs"),
            seed: None,
            reference_isbn: REFERENCE_ISBN.to_string(),
            unknown_isbn: UNKNOWN_ISBN.to_string(),
            fixed_fact: FixedFact {
                isbn: "9781491904244".to_string(),
                pages: 278,
            },
            standing_account: Credentials::new("existingUser", "ExistingUserPassword123!"),
            shared_account: Credentials::new("validUser", "Password123!"),
        }
    }
}

impl HarnessConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Apply `BOOKSTORE_BASE_URL`, `BOOKSTORE_LOG_DIR` and `BOOKSTORE_SEED`.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, HarnessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("BOOKSTORE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(dir) = lookup("BOOKSTORE_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(seed) = lookup("BOOKSTORE_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|e| HarnessError::Config(format!("BOOKSTORE_SEED={seed:?}: {e}")))?;
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_demo_service() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "https://demoqa.com");
        assert_eq!(config.reference_isbn, "9781449325862");
        assert_eq!(config.fixed_fact.pages, 278);
        assert!(config.seed.is_none());
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = HarnessConfig::from_lookup(lookup(&[
            ("BOOKSTORE_BASE_URL", "http://127.0.0.1:3000"),
            ("BOOKSTORE_LOG_DIR", "/tmp/contract"),
            ("BOOKSTORE_SEED", " 42 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/contract"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_seed_is_a_config_error() {
        let err = HarnessConfig::from_lookup(lookup(&[("BOOKSTORE_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn with_base_url_keeps_other_defaults() {
        let config = HarnessConfig::with_base_url("http://localhost:1");
        assert_eq!(config.base_url, "http://localhost:1");
        assert_eq!(config.shared_account.user_name, "validUser");
    }
}
