//! Remote endpoint configuration.
//!
//! # Configuration
//!
//! - `STAFFDIR_REMOTE_URL`: URL of the deployed spreadsheet web app (required)
//! - `STAFFDIR_FALLBACK_PHOTO_URL`: Image shown when a staff photo is missing
//!
//! # Example
//!
//! ```ignore
//! use staffdir_config::RemoteConfig;
//!
//! let config = RemoteConfig::from_env();
//! config.validate()?;
//! ```

use std::env;
use std::fmt;

pub const DEFAULT_FALLBACK_PHOTO_URL: &str =
    "https://drive.google.com/uc?export=download&id=1iUQhelba6oMDa5Lb3EuZL_B4_MS4plzC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    Missing(&'static str),
    /// A variable is set to something unusable.
    Invalid { var: &'static str, reason: String },
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "{} must be set", var),
            Self::Invalid { var, reason } => write!(f, "{} is invalid: {}", var, reason),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub fallback_photo_url: String,
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: lookup("STAFFDIR_REMOTE_URL")
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            fallback_photo_url: lookup("STAFFDIR_FALLBACK_PHOTO_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FALLBACK_PHOTO_URL.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::Missing("STAFFDIR_REMOTE_URL"));
        }
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                var: "STAFFDIR_REMOTE_URL",
                reason: "expected an http(s) URL".to_string(),
            });
        }
        Ok(())
    }
}
