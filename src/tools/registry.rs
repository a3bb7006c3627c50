// ABOUTME: Central registry for MCP tools with capability checks and execution.
// ABOUTME: Provides tool discovery, schema listing, and feature-flag-based registration.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Registry
//!
//! Built once at startup and then used immutably. All registered tools are
//! `Arc`-wrapped for sharing across async tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Central registry for MCP tools.
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Tool categories for organization
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        true
    }

    /// Register a tool and categorize it
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) {
        let name = tool.name().to_owned();
        if self.register(tool) {
            self.categories
                .entry(category.to_owned())
                .or_default()
                .push(name);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// List tool names in a specific category
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Schemas for `tools/list`, sorted by name
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Tools declaring every capability in `required`, sorted by name
    #[must_use]
    pub fn filter_by_capabilities(&self, required: ToolCapabilities) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .iter()
            .filter(|(_, tool)| tool.capabilities().contains(required))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Tools that only read remote data
    #[must_use]
    pub fn read_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .iter()
            .filter(|(_, tool)| {
                let caps = tool.capabilities();
                caps.reads_data() && !caps.writes_data()
            })
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Tools that create, modify, or delete remote data
    #[must_use]
    pub fn write_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .iter()
            .filter(|(_, tool)| tool.capabilities().writes_data())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for unknown tools, `AuthRequired` when the
    /// tool needs a session the connection does not have, and any error the
    /// tool itself returns
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;

        if tool.capabilities().requires_session() {
            context.require_session()?;
        }

        tool.execute(args, context).await
    }

    /// Register all built-in tools based on feature flags
    pub fn register_builtin_tools(&mut self) {
        info!("Registering built-in tools...");

        #[cfg(feature = "tools-workouts")]
        self.register_category(
            super::implementations::workouts::create_workout_tools(),
            "workouts",
        );

        #[cfg(feature = "tools-calendar")]
        self.register_category(
            super::implementations::calendar::create_calendar_tools(),
            "calendar",
        );

        #[cfg(feature = "tools-library")]
        self.register_category(
            super::implementations::library::create_library_tools(),
            "library",
        );

        #[cfg(feature = "tools-session")]
        self.register_category(
            super::implementations::session::create_session_tools(),
            "session",
        );

        info!(
            "Registered {} built-in tools ({} read, {} write, {} normalizing)",
            self.len(),
            self.read_tools().len(),
            self.write_tools().len(),
            self.filter_by_capabilities(ToolCapabilities::NORMALIZES).len()
        );
    }

    #[cfg(any(
        feature = "tools-workouts",
        feature = "tools-calendar",
        feature = "tools-library",
        feature = "tools-session"
    ))]
    fn register_category(&mut self, tools: Vec<Box<dyn McpTool>>, category: &str) {
        debug!(
            "Registering {} tools (registry has {} tools)",
            category,
            self.tools.len()
        );
        for tool in tools {
            self.register_with_category(Arc::from(tool), category);
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
