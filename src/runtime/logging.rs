//! # Observability & Logging
//!
//! This module initializes the global `tracing` subscriber for the process.
//!
//! ## Profiles
//!
//! - **Development**: compact, human-readable lines. Module paths are hidden
//!   (`with_target(false)`); the `request` span is shown inline, so every line
//!   logged while a request is in flight reads like
//!   `INFO request{request_id=... method="GET"}: Resolved order status`.
//! - **Production**: one JSON object per event, with the current span's fields
//!   (the request context) attached.
//! - **Test**: a bare registry. Tests that assert on log output install their own
//!   scoped subscriber, see [`capture`](super::capture).
//!
//! ## Filtering
//!
//! Verbosity comes from `RUST_LOG`, defaulting to `info`:
//!
//! ```bash
//! # Include method entry/exit/timing lines
//! RUST_LOG=debug cargo run
//!
//! # Debug only for this crate
//! RUST_LOG=storefront_support=debug cargo run
//!
//! # JSON output
//! STOREFRONT_LOG_PROFILE=production cargo run
//! ```

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Output profile of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Compact human-readable output.
    #[default]
    Development,
    /// JSON structured output.
    Production,
    /// No output; tests install their own subscriber.
    Test,
}

impl Profile {
    /// Parses a profile name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Development, Self::Production, Self::Test]
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Test => "test",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initializes the tracing/logging infrastructure for the application.
///
/// Only the first call has any effect, so it is safe to call from both a
/// binary's `main` and shared test setup. If another global subscriber or
/// `log` logger is already installed, that one is left in place.
///
/// # Example
///
/// ```ignore
/// setup_tracing(Profile::Development);
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .compact()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter())
                .with_current_span(true)
                .try_init(),
            Profile::Test => tracing_subscriber::registry()
                .try_init()
                .map_err(Into::into),
        };
        if let Err(error) = result {
            tracing::debug!(%error, profile = profile.as_str(), "Global subscriber already installed");
        }
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        // Repeated calls must not panic on the second global install
        setup_tracing(Profile::Test);
        setup_tracing(Profile::Test);
        setup_tracing(Profile::Development);
    }

    #[test]
    fn test_init_after_capture_does_not_panic() {
        let (_guard, capture) = crate::runtime::capture::capture_events(
            tracing::level_filters::LevelFilter::INFO,
        );
        tracing::info!("captured before global setup");

        setup_tracing(Profile::Development);
        setup_tracing(Profile::Production);

        assert_eq!(capture.with_message("captured before global setup").len(), 1);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(Profile::from_name("production"), Some(Profile::Production));
        assert_eq!(Profile::from_name("Development"), Some(Profile::Development));
        assert_eq!(Profile::from_name("staging"), None);
        assert_eq!(Profile::default(), Profile::Development);
    }
}
