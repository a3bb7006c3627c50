// ABOUTME: MCP request processing: validates JSON-RPC envelopes and routes methods to handlers
// ABOUTME: Runs tools/call through the registry and renders tool failures as isError results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::constants::protocol::{
    ERROR_INTERNAL_ERROR, ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST, ERROR_METHOD_NOT_FOUND,
    JSONRPC_VERSION,
};
use crate::logging::AppLogger;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;

use super::protocol::{McpRequest, McpResponse};
use super::resources::ServerResources;
use super::schema::{InitializeResponse, ToolCall};
use super::session::SessionId;

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle an MCP request and return a response
    ///
    /// Notifications produce no response.
    pub async fn handle_request(
        &self,
        request: McpRequest,
        session_id: &SessionId,
    ) -> Option<McpResponse> {
        if request.is_notification() {
            debug!("Received notification: {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(McpResponse::error(
                id,
                ERROR_INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                    request.jsonrpc
                ),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => Self::handle_initialize(id),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(request, id, session_id).await,
            method => {
                warn!("Unknown MCP method: {}", method);
                McpResponse::error(
                    id,
                    ERROR_METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                )
            }
        };
        Some(response)
    }

    fn handle_initialize(id: Value) -> McpResponse {
        debug!("Handling initialize request");
        match serde_json::to_value(InitializeResponse::new()) {
            Ok(result) => McpResponse::success(id, result),
            Err(e) => McpResponse::error(
                id,
                ERROR_INTERNAL_ERROR,
                format!("Failed to serialize initialize response: {e}"),
            ),
        }
    }

    fn handle_tools_list(&self, id: Value) -> McpResponse {
        let tools = self.resources.tool_registry.list_schemas();
        debug!("Listing {} tools", tools.len());
        McpResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(
        &self,
        request: McpRequest,
        id: Value,
        session_id: &SessionId,
    ) -> McpResponse {
        let Some(params) = request.params else {
            return McpResponse::error(id, ERROR_INVALID_PARAMS, "Missing params for tools/call");
        };
        let call: ToolCall = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return McpResponse::error(
                    id,
                    ERROR_INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                );
            }
        };

        let registry = &self.resources.tool_registry;
        if !registry.contains(&call.name) {
            return McpResponse::error_with_data(
                id,
                ERROR_INVALID_PARAMS,
                format!("Unknown tool: {}", call.name),
                json!({ "available_tools": registry.tool_names() }),
            );
        }

        let context = ToolExecutionContext::new(session_id.clone(), Arc::clone(&self.resources))
            .with_request_id(id.clone());
        let arguments = call.arguments.unwrap_or_else(|| json!({}));

        let started = Instant::now();
        let outcome = registry.execute(&call.name, arguments, &context).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = match outcome {
            Ok(result) => result,
            Err(error) => {
                debug!(
                    tool = %call.name,
                    code = ?error.code,
                    "Tool returned error: {}",
                    error.message
                );
                ToolResult::from_app_error(&error)
            }
        };
        AppLogger::log_mcp_tool_call(
            session_id.as_str(),
            &call.name,
            !result.is_error,
            duration_ms,
        );

        match serde_json::to_value(result.into_response()) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(
                id,
                ERROR_INTERNAL_ERROR,
                format!("Failed to serialize tool response: {e}"),
            ),
        }
    }
}
