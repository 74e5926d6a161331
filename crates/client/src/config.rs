//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `WORKPRO_API_URL` - Backend base URL. Empty (the default) means request
//!   paths are already absolute URLs.
//! - `WORKPRO_SESSION_FILE` - Where the session is persisted
//!   (default: `.workpro/session.json`)
//! - `WORKPRO_SUPER_ADMIN_EMAIL` - Account routed to the super-admin console

use std::path::PathBuf;

use thiserror::Error;
use workpro_core::Email;

const DEFAULT_SESSION_FILE: &str = ".workpro/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// WorkPro client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash, or empty.
    pub base_url: String,
    /// Session file location.
    pub session_file: PathBuf,
    /// Email of the super-admin account (UI routing only).
    pub super_admin_email: Option<Email>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("WORKPRO_API_URL", ""))?;
        let session_file =
            PathBuf::from(get_env_or_default("WORKPRO_SESSION_FILE", DEFAULT_SESSION_FILE));
        let super_admin_email = get_optional_env("WORKPRO_SUPER_ADMIN_EMAIL")
            .map(|raw| {
                Email::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("WORKPRO_SUPER_ADMIN_EMAIL".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            base_url,
            session_file,
            super_admin_email,
        })
    }

    /// Config pointing at `base_url`, everything else defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is neither empty nor an absolute URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            super_admin_email: None,
        })
    }
}

/// Validate the base URL and drop any trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let url = url::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar("WORKPRO_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "WORKPRO_API_URL".to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(trimmed.to_owned())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
