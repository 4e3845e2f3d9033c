//! MCP server implementation for the service recommender.
//!
//! This module provides the MCP protocol server that exposes recommendations
//! to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::RecommenderMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the recommender MCP server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns once the
/// client disconnects.
pub async fn run_server(server: RecommenderMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
