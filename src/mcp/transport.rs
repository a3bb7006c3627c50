// ABOUTME: Line-delimited JSON-RPC transport over stdin/stdout for a single MCP client
// ABOUTME: Parses each line, dispatches it to the request processor, and writes one response line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Stdio transport
//!
//! stdout carries protocol messages only. All logging goes to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::constants::protocol::ERROR_PARSE;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

use super::protocol::{McpRequest, McpResponse};
use super::request_processor::McpRequestProcessor;
use super::resources::ServerResources;
use super::session::SessionId;

/// Serves one MCP client over the process's stdio
pub struct StdioTransport {
    processor: McpRequestProcessor,
    session_id: SessionId,
}

impl StdioTransport {
    /// Transport bound to the stdio connection's session
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            processor: McpRequestProcessor::new(resources),
            session_id: SessionId::stdio(),
        }
    }

    /// Session id this transport serves
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Read requests from stdin until EOF
    ///
    /// # Errors
    ///
    /// Returns an error when stdin cannot be read or stdout cannot be written
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        AppLogger::log_session_event(self.session_id.as_str(), "connected");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read stdin: {e}")))?
        {
            if let Some(reply) = self.process_line(&line).await {
                stdout
                    .write_all(format!("{reply}\n").as_bytes())
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to write stdout: {e}")))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to flush stdout: {e}")))?;
            }
        }

        AppLogger::log_session_event(self.session_id.as_str(), "disconnected");
        info!("stdin closed, stopping stdio transport");
        Ok(())
    }

    /// Handle one input line and return the serialized response, if any
    pub async fn process_line(&self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                debug!("Received MCP request: method={}", request.method);
                self.processor
                    .handle_request(request, &self.session_id)
                    .await?
            }
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                Self::parse_error_response(&e)
            }
        };

        match serde_json::to_string(&response) {
            Ok(serialized) => Some(serialized),
            Err(e) => {
                warn!("Failed to serialize MCP response: {}", e);
                None
            }
        }
    }

    fn parse_error_response(error: &serde_json::Error) -> McpResponse {
        McpResponse::error(
            serde_json::Value::Null,
            ERROR_PARSE,
            format!("Parse error: {error}"),
        )
    }
}
