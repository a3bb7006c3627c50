// ABOUTME: MCP protocol layer: JSON-RPC envelopes, schemas, sessions, routing, and stdio transport.
// ABOUTME: Wires incoming lines to the request processor and tool registry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

/// JSON-RPC request and response envelopes
pub mod protocol;
/// Method routing for MCP requests
pub mod request_processor;
/// Shared server resources
pub mod resources;
/// MCP schema types (tools, content, initialize)
pub mod schema;
/// Per-connection Garmin sessions
pub mod session;
/// Line-delimited stdio transport
pub mod transport;

pub use protocol::{McpError, McpRequest, McpResponse};
pub use request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use session::{ClientFactory, HttpClientFactory, SessionId, SessionStatus, SessionStore};
pub use transport::StdioTransport;
