//! Runtime configuration loaded from the environment.

use std::env;
use thiserror::Error;

use crate::hash::MessageDigest;
use crate::keygen::SecretBound;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}={1}")]
    Invalid(String, String),
}

/// Policy knobs for signing and key generation. Curve parameters are fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// `ORBITAL_MESSAGE_DIGEST`: `sha256` (default) or `truncate`.
    pub message_digest: MessageDigest,
    /// `ORBITAL_KEY_BOUND`: `order` (default) or `prime`.
    pub key_bound: SecretBound,
}

fn parse_digest(v: &str) -> Option<MessageDigest> {
    match v.to_ascii_lowercase().as_str() {
        "sha256" => Some(MessageDigest::Sha256),
        "truncate" => Some(MessageDigest::Truncate),
        _ => None,
    }
}

fn parse_bound(v: &str) -> Option<SecretBound> {
    match v.to_ascii_lowercase().as_str() {
        "order" => Some(SecretBound::Order),
        "prime" => Some(SecretBound::Prime),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Config::default();
        if let Some(v) = lookup("ORBITAL_MESSAGE_DIGEST") {
            cfg.message_digest = parse_digest(&v)
                .ok_or_else(|| ConfigError::Invalid("ORBITAL_MESSAGE_DIGEST".to_string(), v))?;
        }
        if let Some(v) = lookup("ORBITAL_KEY_BOUND") {
            cfg.key_bound = parse_bound(&v)
                .ok_or_else(|| ConfigError::Invalid("ORBITAL_KEY_BOUND".to_string(), v))?;
        }
        Ok(cfg)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.message_digest, MessageDigest::Sha256);
        assert_eq!(cfg.key_bound, SecretBound::Order);
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("ORBITAL_MESSAGE_DIGEST", "TRUNCATE"),
            ("ORBITAL_KEY_BOUND", "prime"),
        ]))
        .unwrap();
        assert_eq!(cfg.message_digest, MessageDigest::Truncate);
        assert_eq!(cfg.key_bound, SecretBound::Prime);
    }

    #[test]
    fn test_invalid_value() {
        let err = Config::from_lookup(lookup(&[("ORBITAL_KEY_BOUND", "huge")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("ORBITAL_KEY_BOUND".to_string(), "huge".to_string())
        );
    }
}
