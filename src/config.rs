// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use crate::models::ExpiryPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Hosted API used when `FITNESS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://fitness-tracker-p7dp.onrender.com/api/";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the fitness API (always ends with `/`)
    pub api_url: String,
    /// File holding the persisted credential pair
    pub token_path: PathBuf,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
    /// Whether `restore()` rejects an access token whose `exp` has passed
    pub expiry_policy: ExpiryPolicy,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/".to_string(),
            token_path: PathBuf::from("fitness_tokens.json"),
            request_timeout: Duration::from_secs(30),
            expiry_policy: ExpiryPolicy::Lenient,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timeout_secs = match env::var("FITNESS_REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("FITNESS_REQUEST_TIMEOUT_SECS", v))?,
            Err(_) => 30,
        };

        let expiry_policy = match env::var("FITNESS_STRICT_EXPIRY") {
            Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => ExpiryPolicy::Strict,
                "0" | "false" | "no" | "" => ExpiryPolicy::Lenient,
                _ => return Err(ConfigError::Invalid("FITNESS_STRICT_EXPIRY", v)),
            },
            Err(_) => ExpiryPolicy::Lenient,
        };

        Ok(Self {
            api_url: normalize_base_url(
                &env::var("FITNESS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            token_path: env::var("FITNESS_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("fitness_tokens.json")),
            request_timeout: Duration::from_secs(timeout_secs),
            expiry_policy,
        })
    }

    /// Override the API base URL (trailing slash is added if missing).
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = normalize_base_url(url);
        self
    }
}

/// Resource paths are relative (`ejercicios/`), so the base must end in `/`.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
