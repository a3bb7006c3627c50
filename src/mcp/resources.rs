// ABOUTME: Centralized resource container shared by the transport, processor, and tools
// ABOUTME: Holds configuration, the session store, and the tool registry behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Server Resources Module
//!
//! Built once at startup and shared by reference for the lifetime of the
//! process.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::tools::registry::ToolRegistry;

use super::session::{ClientFactory, HttpClientFactory, SessionStore};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Per-connection Garmin sessions
    pub sessions: Arc<SessionStore>,
    /// Registered MCP tools
    pub tool_registry: Arc<ToolRegistry>,
}

impl ServerResources {
    /// Resources talking to the configured Garmin Connect host
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let factory = Arc::new(HttpClientFactory::new(config.api_base_url.clone()));
        Self::with_client_factory(config, factory)
    }

    /// Resources with a custom client factory
    #[must_use]
    pub fn with_client_factory(config: ServerConfig, factory: Arc<dyn ClientFactory>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();
        Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new(factory)),
            tool_registry: Arc::new(registry),
        }
    }
}
