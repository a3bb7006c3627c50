// ABOUTME: Server binary serving the Garmin workout MCP tools over stdio
// ABOUTME: Loads configuration, initializes logging, and runs the stdio transport until EOF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Garmin MCP Server Binary
//!
//! stdout carries JSON-RPC only; logs are written to stderr.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use garmin_connect::initialize_shared_client;
use garmin_mcp_server::{
    config::environment::ServerConfig,
    logging,
    mcp::{resources::ServerResources, session::SessionId, transport::StdioTransport},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "garmin-mcp-server")]
#[command(about = "Garmin Connect workout MCP server - normalize, create, and schedule workouts")]
pub struct Args {
    /// Override the Garmin Connect API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Session tokens to install for the stdio connection at startup
    #[arg(long, env = "GARMIN_SESSION_TOKENS", hide_env_values = true)]
    tokens: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(tokens) = args.tokens {
        config = config.with_session_tokens(tokens);
    }

    info!("Starting Garmin MCP Server");
    info!("{}", config.summary());

    initialize_shared_client(config.http_timeout_secs, config.http_connect_timeout_secs);

    let preload = config.session_tokens.clone();
    let resources = Arc::new(ServerResources::new(config));
    info!(
        "Tool registry initialized with {} tools",
        resources.tool_registry.len()
    );

    if let Some(tokens) = preload {
        match resources.sessions.set_tokens(&SessionId::stdio(), &tokens) {
            Ok(_) => info!("Preloaded Garmin session for stdio connection"),
            Err(e) => warn!("Ignoring preloaded session tokens: {}", e),
        }
    }

    StdioTransport::new(resources).run().await?;

    info!("Garmin MCP Server stopped");
    Ok(())
}
