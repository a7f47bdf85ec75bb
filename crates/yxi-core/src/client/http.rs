//! Blocking HTTP client for tool nodes
//!
//! Wire contract, per node:
//! - `GET  {url}/tools`        -> tool list (see `tool_list`)
//! - `POST {url}/tools/{tool}` -> `{"input": ..., "context": ...}` in, any JSON out
//!
//! One attempt per call, bounded by the configured timeout. No retries.


use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::{json, Value};

use super::tool_list::parse_tool_list;
use crate::config::ClientConfig;
use crate::error::{McpError, McpResult};
use crate::logging::{file_logger, SharedLogger};
use crate::types::{Node, ToolDescriptor, ToolRequest};

const USER_AGENT: &str = concat!("yxi/", env!("CARGO_PKG_VERSION"));

/// Longest response excerpt copied into log messages
const LOG_EXCERPT: usize = 200;

/// HTTP transport for the node tool protocol
pub struct ToolClient {
    http: Client,
    logger: SharedLogger,
}

impl ToolClient {
    pub fn new(config: &ClientConfig, logger: SharedLogger) -> McpResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| McpError::network("(client setup)", e))?;
        Ok(Self { http, logger })
    }

    /// List the tools a node advertises
    pub fn list_tools(&self, node: &Node) -> McpResult<Vec<ToolDescriptor>> {
        let url = endpoint(node, &["tools"])?;
        let builder = self.request(self.http.get(url.clone()), node);

        let tools = match self.send(&url, builder)? {
            Some(payload) => parse_tool_list(payload),
            None => Vec::new(),
        };

        crate::log_info!(
            self.logger,
            "[ToolClient] Node '{}' lists {} tool(s)",
            node.name,
            tools.len()
        );
        Ok(tools)
    }

    /// Invoke `tool_name` on a node and return its JSON result as-is
    ///
    /// An empty 2xx body reads as `{"ok": true}`.
    pub fn invoke(&self, node: &Node, tool_name: &str, request: &ToolRequest) -> McpResult<Value> {
        validate_tool_name(tool_name)?;

        let url = endpoint(node, &["tools", tool_name])?;
        crate::log_info!(
            self.logger,
            "[ToolClient] Calling tool '{}' on node '{}'",
            tool_name,
            node.name
        );
        let builder = self.request(self.http.post(url.clone()), node).json(request);

        Ok(self.send(&url, builder)?.unwrap_or_else(|| json!({ "ok": true })))
    }

    fn request(&self, builder: RequestBuilder, node: &Node) -> RequestBuilder {
        let builder = builder.header(CONTENT_TYPE, "application/json");
        match node.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Execute a request; `None` means a 2xx response with an empty body
    fn send(&self, url: &Url, builder: RequestBuilder) -> McpResult<Option<Value>> {
        file_logger::debug("client::http", &format!("-> {}", url));

        let response = builder.send().map_err(|e| {
            crate::log_error!(self.logger, "[ToolClient] Request to {} failed: {}", url, e);
            McpError::network(url.as_str(), e)
        })?;

        let status = response.status();
        let failure = response.error_for_status_ref().err();
        if let Some(e) = failure {
            let detail = response.text().unwrap_or_default();
            file_logger::warn("client::http", &format!("<- {} {}: {}", status, url, detail));
            crate::log_error!(
                self.logger,
                "[ToolClient] {} answered {}: {}",
                url,
                status,
                excerpt(&detail)
            );
            return Err(McpError::network(url.as_str(), e));
        }

        let body = response
            .bytes()
            .map_err(|e| McpError::network(url.as_str(), e))?;
        file_logger::debug(
            "client::http",
            &format!("<- {} {} ({} bytes)", status, url, body.len()),
        );

        if body.is_empty() {
            return Ok(None);
        }
        file_logger::trace("client::http", &String::from_utf8_lossy(&body));

        serde_json::from_slice(&body).map(Some).map_err(|source| {
            crate::log_warn!(self.logger, "[ToolClient] Non-JSON body from {}", url);
            McpError::MalformedResponse {
                url: url.to_string(),
                source,
            }
        })
    }
}

impl std::fmt::Debug for ToolClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolClient").finish_non_exhaustive()
    }
}

/// Reject tool names that cannot travel as a single path segment
///
/// URL path normalization drops `.` and resolves `..`, which would turn
/// `POST /tools/..` into `POST /tools`.
pub(crate) fn validate_tool_name(tool_name: &str) -> McpResult<()> {
    match tool_name {
        "" => Err(McpError::invalid_argument("Tool name is required")),
        "." | ".." => Err(McpError::invalid_argument(format!(
            "Invalid tool name '{}'",
            tool_name
        ))),
        _ => Ok(()),
    }
}

/// Append path segments to a node's base URL, percent-encoding each one
fn endpoint(node: &Node, segments: &[&str]) -> McpResult<Url> {
    let mut url = Url::parse(&node.url).map_err(|e| {
        McpError::invalid_argument(format!("Invalid URL for node '{}': {}", node.name, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            McpError::invalid_argument(format!(
                "URL for node '{}' cannot take a path: {}",
                node.name, node.url
            ))
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(LOG_EXCERPT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
