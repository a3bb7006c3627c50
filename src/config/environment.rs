// ABOUTME: Environment configuration for the Garmin Connect endpoint and HTTP behavior
// ABOUTME: Parses environment variables into a validated ServerConfig at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Environment-based configuration

use std::env;
use std::fmt;

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

use crate::constants::defaults::{
    API_BASE_URL, HTTP_CONNECT_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, WORKOUT_LIST_LIMIT,
};
use crate::constants::limits::MAX_WORKOUT_LIST_LIMIT;

/// Environment variable names
pub mod env_keys {
    /// Garmin Connect API base URL
    pub const API_BASE_URL: &str = "GARMIN_API_BASE_URL";
    /// Total request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "GARMIN_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "GARMIN_HTTP_CONNECT_TIMEOUT_SECS";
    /// Tokens preloaded into the stdio session
    pub const SESSION_TOKENS: &str = "GARMIN_SESSION_TOKENS";
    /// Default page size of `get_workouts`
    pub const WORKOUT_LIST_LIMIT: &str = "GARMIN_WORKOUT_LIST_LIMIT";
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Garmin Connect API base URL, without trailing slash
    pub api_base_url: String,
    /// Total request timeout in seconds
    pub http_timeout_secs: u64,
    /// Connect timeout in seconds
    pub http_connect_timeout_secs: u64,
    /// Raw session tokens to install for the stdio connection at startup
    pub session_tokens: Option<String>,
    /// Default page size of `get_workouts`
    pub workout_list_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_owned(),
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            http_connect_timeout_secs: HTTP_CONNECT_TIMEOUT_SECS,
            session_tokens: None,
            workout_list_limit: WORKOUT_LIST_LIMIT,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_connect_timeout_secs", &self.http_connect_timeout_secs)
            .field(
                "session_tokens",
                &self.session_tokens.as_ref().map(|_| "[REDACTED]"),
            )
            .field("workout_list_limit", &self.workout_list_limit)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric value does not parse or the base URL is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            api_base_url: env_var_or(env_keys::API_BASE_URL, API_BASE_URL),
            http_timeout_secs: env_var_or(
                env_keys::HTTP_TIMEOUT_SECS,
                &HTTP_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid GARMIN_HTTP_TIMEOUT_SECS value")?,
            http_connect_timeout_secs: env_var_or(
                env_keys::HTTP_CONNECT_TIMEOUT_SECS,
                &HTTP_CONNECT_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid GARMIN_HTTP_CONNECT_TIMEOUT_SECS value")?,
            session_tokens: env::var(env_keys::SESSION_TOKENS)
                .ok()
                .map(|tokens| tokens.trim().to_owned())
                .filter(|tokens| !tokens.is_empty()),
            workout_list_limit: env_var_or(
                env_keys::WORKOUT_LIST_LIMIT,
                &WORKOUT_LIST_LIMIT.to_string(),
            )
            .parse()
            .context("Invalid GARMIN_WORKOUT_LIST_LIMIT value")?,
        }
        .normalized()?;

        info!("{}", config.summary());
        Ok(config)
    }

    /// Apply a base URL override (command line)
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.api_base_url = base_url.into();
        self.normalized()
    }

    /// Apply a session tokens override (command line)
    #[must_use]
    pub fn with_session_tokens(mut self, tokens: impl Into<String>) -> Self {
        let tokens = tokens.into().trim().to_owned();
        self.session_tokens = (!tokens.is_empty()).then_some(tokens);
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error for zero timeouts, an out-of-range list limit, or a
    /// base URL that is not absolute http(s)
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid GARMIN_API_BASE_URL '{}'", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "GARMIN_API_BASE_URL must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.http_timeout_secs == 0 || self.http_connect_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP timeouts must be greater than zero"));
        }
        if self.workout_list_limit == 0 || self.workout_list_limit > MAX_WORKOUT_LIST_LIMIT {
            return Err(anyhow::anyhow!(
                "GARMIN_WORKOUT_LIST_LIMIT must be between 1 and {MAX_WORKOUT_LIST_LIMIT}"
            ));
        }
        Ok(())
    }

    /// Configuration summary for startup logs; tokens are never printed
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Garmin MCP Server Configuration:\n\
             - API Base URL: {}\n\
             - HTTP Timeout: {}s (connect {}s)\n\
             - Workout List Limit: {}\n\
             - Preloaded Session: {}",
            self.api_base_url,
            self.http_timeout_secs,
            self.http_connect_timeout_secs,
            self.workout_list_limit,
            if self.session_tokens.is_some() {
                "Yes"
            } else {
                "No"
            }
        )
    }

    fn normalized(mut self) -> Result<Self> {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_owned();
        self.validate()?;
        Ok(self)
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url, "https://connectapi.garmin.com");
    }

    #[test]
    fn test_base_url_override_is_trimmed() {
        let config = ServerConfig::default()
            .with_base_url("http://localhost:8080/")
            .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(ServerConfig::default().with_base_url("ftp://host").is_err());
        assert!(ServerConfig::default().with_base_url("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = ServerConfig::default().with_session_tokens("secret-access-token-value");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret-access-token-value"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_blank_tokens_are_ignored() {
        let config = ServerConfig::default().with_session_tokens("   ");
        assert!(config.session_tokens.is_none());
    }
}
