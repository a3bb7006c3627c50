// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Mutates process environment, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use garmin_mcp_server::config::environment::{env_keys, ServerConfig};
use garmin_mcp_server::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const ALL_KEYS: &[&str] = &[
    env_keys::API_BASE_URL,
    env_keys::HTTP_TIMEOUT_SECS,
    env_keys::HTTP_CONNECT_TIMEOUT_SECS,
    env_keys::SESSION_TOKENS,
    env_keys::WORKOUT_LIST_LIMIT,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.api_base_url, "https://connectapi.garmin.com");
    assert_eq!(config.http_timeout_secs, 30);
    assert_eq!(config.http_connect_timeout_secs, 10);
    assert_eq!(config.workout_list_limit, 100);
    assert!(config.session_tokens.is_none());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(env_keys::API_BASE_URL, "http://127.0.0.1:9000/");
    env::set_var(env_keys::HTTP_TIMEOUT_SECS, "5");
    env::set_var(env_keys::HTTP_CONNECT_TIMEOUT_SECS, "2");
    env::set_var(env_keys::WORKOUT_LIST_LIMIT, "25");
    env::set_var(env_keys::SESSION_TOKENS, "  preloaded-token-abcdefgh  ");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    assert_eq!(config.http_timeout_secs, 5);
    assert_eq!(config.http_connect_timeout_secs, 2);
    assert_eq!(config.workout_list_limit, 25);
    assert_eq!(config.session_tokens.as_deref(), Some("preloaded-token-abcdefgh"));
    assert!(!config.summary().contains("preloaded-token"));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var(env_keys::HTTP_TIMEOUT_SECS, "soon");
    let error = ServerConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("GARMIN_HTTP_TIMEOUT_SECS"));

    clear_env();
    env::set_var(env_keys::HTTP_TIMEOUT_SECS, "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var(env_keys::WORKOUT_LIST_LIMIT, "100000");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var(env_keys::API_BASE_URL, "garmin.example");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("RUST_LOG");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");
}
