//! MCP server for oak-mcp — exposes ontology term search and lookup via
//! the Model Context Protocol.
//!
//! Tools: search, get_term_details, search_ontology.

pub mod params;

use crate::config::OakConfig;
use crate::ontology::BackendRegistry;
use crate::terms::{TermService, DEFAULT_LIMIT};
use params::*;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ok_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

// ---------------------------------------------------------------------------
// OakMcpServer
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct OakMcpServer {
    terms: TermService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OakMcpServer {
    pub fn new(terms: TermService) -> Self {
        Self {
            terms,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search ontologies for terms matching free text. Returns [term_id, namespace, label] triples in relevancy order. Synonyms may be incomplete: if a concept is missing, try related or broader terms, case variants, or the sub-terms of a composite phrase."
    )]
    async fn search(
        &self,
        Parameters(p): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let hits = self
            .terms
            .search(&p.term, p.ontology_id.as_deref(), p.n.unwrap_or(DEFAULT_LIMIT))
            .await;
        ok_json(&hits)
    }

    #[tool(
        description = "Get label, definition, synonyms and namespace for a term identifier such as 'MONDO:0005148'. Returns {\"error\": ...} when the term cannot be found."
    )]
    async fn get_term_details(
        &self,
        Parameters(p): Parameters<TermDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        let details = self.terms.term_details(&p.term_id).await;
        ok_json(&details)
    }

    #[tool(
        description = "Search one ontology backend by selector, e.g. 'ols:mondo', 'ols:hp', 'ols:go', 'ols:chebi', 'ols:uberon', 'ols:cl', 'ols:ncit' or a local store like 'sqlite:obo:hgnc'. Prefer 'ols:' selectors for non-exact matches. Returns [term_id, label] pairs, or null if the backend cannot be used."
    )]
    async fn search_ontology(
        &self,
        Parameters(p): Parameters<SearchOntologyParams>,
    ) -> Result<CallToolResult, McpError> {
        let pairs = self
            .terms
            .search_selector(&p.term, &p.ontology, p.n.unwrap_or(DEFAULT_LIMIT))
            .await;
        ok_json(&pairs)
    }
}

#[tool_handler]
impl ServerHandler for OakMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "oak-mcp — ontology term search and lookup (OLS and local semantic-sql stores)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run_mcp_server(config: OakConfig) -> i32 {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to create tokio runtime");
            return 1;
        }
    };

    rt.block_on(async {
        let registry = match BackendRegistry::new(config) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "failed to initialise ontology backends");
                return 1;
            }
        };

        let server = OakMcpServer::new(TermService::new(Arc::new(registry)));

        tracing::info!("oak-mcp server starting on stdio");

        let service = match server.serve(rmcp::transport::stdio()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "failed to start MCP server");
                return 1;
            }
        };

        if let Err(e) = service.waiting().await {
            tracing::error!(error = %e, "MCP server error");
            return 1;
        }

        0
    })
}
