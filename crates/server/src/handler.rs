//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::AppState;
use crate::tools::assistant_ask::{AssistantAskParams, ask_impl};
use crate::tools::cache::{CacheGetParams, CachePurgeParams, get_impl, purge_impl, sets_impl};
use crate::tools::site_fetch::{SiteFetchParams, fetch_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for folio.
#[derive(Clone)]
pub struct FolioServer {
    tool_router: ToolRouter<Self>,
    state: Arc<AppState>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl FolioServer {
    /// Create a new server handler.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { tool_router: Self::tool_router(), state }
    }

    #[tool(
        description = "Request a site URL through the offline cache router. Returns status, where the response came from (network, cache, offline_fallback) and a body preview."
    )]
    async fn site_fetch(&self, params: Parameters<SiteFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.state.router, params.0).await
    }

    #[tool(description = "Look up a stored response by URL, optionally within one cache set.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.state.db, params.0).await
    }

    #[tool(description = "Trim one cache set to its newest max_entries entries.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.state.db, params.0).await
    }

    #[tool(description = "List cache sets with their entry counts and whether they belong to the current generation.")]
    async fn cache_sets(&self) -> Result<CallToolResult, McpError> {
        sets_impl(&self.state.db, &self.state.router.config().cache_names).await
    }

    /// Ask the portfolio assistant.
    ///
    /// Failures come back as a notice with the slower reveal pace.
    #[tool(description = "Ask the portfolio assistant a question. Returns the reply, rendered lines and the reveal interval.")]
    async fn assistant_ask(&self, params: Parameters<AssistantAskParams>) -> Result<CallToolResult, McpError> {
        ask_impl(self.state.assistant.as_ref(), &self.state.config, params.0).await
    }
}

impl ServerHandler for FolioServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "folio-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
