//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the logging profile
pub const PROFILE_ENV_VAR: &str = "REVSTORE_LOG_PROFILE";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `revstore=debug`
    Development,
    /// JSON structured output, `revstore=info`
    Production,
    /// Bare registry; capture is installed via `init_test_capture()`
    Test,
}

impl Profile {
    /// Parse a profile name (`development`, `production`, `test`)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Profile::Development),
            "production" | "prod" => Some(Profile::Production),
            "test" => Some(Profile::Test),
            _ => None,
        }
    }

    /// Read the profile from `REVSTORE_LOG_PROFILE`, defaulting to Development
    pub fn from_env() -> Self {
        std::env::var(PROFILE_ENV_VAR)
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or(Profile::Development)
    }

    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "revstore=debug",
            Profile::Production | Profile::Test => "revstore=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter.
///
/// # Example
///
/// ```
/// use revstore_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// init(Profile::Development); // ignored
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // Another subscriber (e.g. test capture) may already own the global slot.
        if let Err(err) = result {
            tracing::debug!(error = %err, "logging subscriber already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("prod"), Some(Profile::Production));
        assert_eq!(Profile::parse(" Development "), Some(Profile::Development));
        assert_eq!(Profile::parse("TEST"), Some(Profile::Test));
        assert_eq!(Profile::parse("verbose"), None);
    }

    #[test]
    fn test_default_filters() {
        assert_eq!(Profile::Development.default_filter(), "revstore=debug");
        assert_eq!(Profile::Production.default_filter(), "revstore=info");
    }
}
