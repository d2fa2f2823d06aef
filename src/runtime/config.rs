//! Application configuration, read from the environment.
//!
//! | Variable                   | Values                                  | Default       |
//! |----------------------------|-----------------------------------------|---------------|
//! | `STOREFRONT_LOG_PROFILE`   | `development`, `production`, `test`     | `development` |
//! | `STOREFRONT_STATUS_POLICY` | `lenient`, `strict`                     | `lenient`     |
//! | `RUST_LOG`                 | any `EnvFilter` directive               | `info`        |
//!
//! Values are matched ignoring ASCII case; empty values count as unset.
//! `RUST_LOG` is read by [`setup_tracing`](super::setup_tracing) itself.

use super::logging::Profile;
use crate::status::FallbackPolicy;
use thiserror::Error;

pub const LOG_PROFILE_VAR: &str = "STOREFRONT_LOG_PROFILE";
pub const STATUS_POLICY_VAR: &str = "STOREFRONT_STATUS_POLICY";

/// Errors that can occur while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value outside its allowed set.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub log_profile: Profile,
    pub status_policy: FallbackPolicy,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_profile = parse_var(&lookup, LOG_PROFILE_VAR, Profile::from_name)?;
        let status_policy = parse_var(&lookup, STATUS_POLICY_VAR, policy_from_name)?;

        Ok(Self {
            log_profile: log_profile.unwrap_or_default(),
            status_policy: status_policy.unwrap_or_default(),
        })
    }
}

fn policy_from_name(name: &str) -> Option<FallbackPolicy> {
    if name.eq_ignore_ascii_case("lenient") {
        Some(FallbackPolicy::Lenient)
    } else if name.eq_ignore_ascii_case("strict") {
        Some(FallbackPolicy::Strict)
    } else {
        None
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse(trimmed)
        .map(Some)
        .ok_or(ConfigError::InvalidValue { key, value: raw })
}
