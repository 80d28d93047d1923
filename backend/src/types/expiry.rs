//! Expiry windows for presigned artifacts

use std::env;
use std::time::Duration;

/// Default lifetime of a presigned GET URL
pub const DEFAULT_GET_EXPIRY_SECS: u64 = 10;
/// Default lifetime of a presigned POST upload descriptor
pub const DEFAULT_POST_EXPIRY_SECS: u64 = 60;

/// `SigV4` rejects presigned requests valid for longer than seven days
const MAX_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

const GET_EXPIRY_VAR: &str = "GetDefaultExpiry";
const POST_EXPIRY_VAR: &str = "PostDefaultExpiry";

/// Immutable expiry configuration, built once at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryConfig {
    get_expiry_secs: u64,
    post_expiry_secs: u64,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GET_EXPIRY_SECS, DEFAULT_POST_EXPIRY_SECS)
    }
}

impl ExpiryConfig {
    /// Creates a configuration with explicit expiry windows in seconds
    #[must_use]
    pub const fn new(get_expiry_secs: u64, post_expiry_secs: u64) -> Self {
        Self {
            get_expiry_secs,
            post_expiry_secs,
        }
    }

    /// Reads `GetDefaultExpiry` and `PostDefaultExpiry`, overlaying them on the defaults.
    ///
    /// Values that are missing, not a positive integer, or longer than seven
    /// days fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            expiry_from_env(GET_EXPIRY_VAR, DEFAULT_GET_EXPIRY_SECS),
            expiry_from_env(POST_EXPIRY_VAR, DEFAULT_POST_EXPIRY_SECS),
        )
    }

    /// Lifetime of presigned GET URLs
    #[must_use]
    pub const fn get_expiry(&self) -> Duration {
        Duration::from_secs(self.get_expiry_secs)
    }

    /// Lifetime of presigned upload descriptors
    #[must_use]
    pub const fn post_expiry(&self) -> Duration {
        Duration::from_secs(self.post_expiry_secs)
    }

    /// `ExpiresIn` value reported alongside presigned GET URLs
    #[must_use]
    pub fn get_expires_in(&self) -> String {
        self.get_expiry_secs.to_string()
    }

    /// `ExpiresIn` value reported alongside upload descriptors
    #[must_use]
    pub fn post_expires_in(&self) -> String {
        self.post_expiry_secs.to_string()
    }
}

fn expiry_from_env(name: &str, default: u64) -> u64 {
    let Ok(raw) = env::var(name) else {
        return default;
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if (1..=MAX_EXPIRY_SECS).contains(&secs) => secs,
        _ => {
            tracing::warn!(
                variable = name,
                value = %raw,
                default,
                "Ignoring invalid expiry override"
            );
            default
        }
    }
}
