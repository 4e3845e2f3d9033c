//! MCP tool handlers for the recommender server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::services::RecommendationService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The MCP server that exposes service recommendations.
#[derive(Clone)]
pub struct RecommenderMcpServer {
    service: Arc<dyn RecommendationService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for RecommenderMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "service-recommender".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Recommends accommodation, food and tiffin services from users' bookmarks using association rules, popularity and a seeded random fallback.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct GetRecommendationsParams {
    user_id: String,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ServiceIdParams {
    service_id: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl RecommenderMcpServer {
    /// Create a new recommender MCP server.
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Recommend services for a user.
    #[tool(
        description = "Recommend services for a user. Combines association rules mined from everyone's bookmarks, popularity among other users and a seeded random fill. Each result names its source and evidence."
    )]
    async fn get_recommendations(
        &self,
        params: Parameters<GetRecommendationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: get_recommendations called");
        tracing::debug!(
            "Parameters: user_id={}, top_k={:?}",
            params.user_id,
            params.top_k
        );

        let recommendations = self
            .service
            .recommend(&params.user_id, params.top_k)
            .await
            .map_err(|e| {
                tracing::error!("Failed to build recommendations: {:?}", e);
                to_mcp_error(e)
            })?;

        let mut sources: BTreeMap<&str, usize> = BTreeMap::new();
        for recommendation in &recommendations {
            *sources.entry(recommendation.source.label()).or_insert(0) += 1;
        }

        json_result(&serde_json::json!({
            "user_id": params.user_id,
            "count": recommendations.len(),
            "sources": sources,
            "recommendations": recommendations,
        }))
    }

    /// List every user with bookmarks.
    #[tool(description = "List the ids of all users who have bookmarked at least one service")]
    async fn list_users(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: list_users called");

        let users = self.service.list_users().await.map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": users.len(),
            "users": users,
        }))
    }

    /// Bookmark popularity summary.
    #[tool(
        description = "Get bookmark statistics: total bookmarks, unique services, the most popular service and the ten most bookmarked services"
    )]
    async fn get_popularity_stats(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: get_popularity_stats called");

        let stats = self.service.popularity_stats().await.map_err(to_mcp_error)?;
        json_result(&stats)
    }

    /// Look up one service.
    #[tool(description = "Get the catalog entry for a service id")]
    async fn get_service(
        &self,
        params: Parameters<ServiceIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: get_service called for {}", params.service_id);

        let service = self
            .service
            .get_service(&params.service_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "service": service,
            "image": service.category.image_url(),
        }))
    }
}
