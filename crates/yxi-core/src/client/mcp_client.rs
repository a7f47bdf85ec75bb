//! Session-level MCP client: node registry plus tool transport

use std::sync::Arc;

use serde_json::Value;

use super::http::{validate_tool_name, ToolClient};
use crate::config::ClientConfig;
use crate::error::McpResult;
use crate::logging::SharedLogger;
use crate::registry::NodeRegistry;
use crate::store::FileNodeStore;
use crate::types::{Node, ToolDescriptor, ToolRequest};

/// Manages registered nodes and invokes tools on them
///
/// Node operations go to the owned `NodeRegistry`; tool operations resolve a
/// target node (explicit name, else the active node) and hand it to the
/// `ToolClient`.
#[derive(Debug)]
pub struct McpClient {
    registry: NodeRegistry,
    tools: ToolClient,
}

impl McpClient {
    pub fn new(registry: NodeRegistry, tools: ToolClient) -> Self {
        Self { registry, tools }
    }

    /// Open the file-backed registry at `config.state_path`
    pub fn open(config: &ClientConfig, logger: SharedLogger) -> McpResult<Self> {
        let store = Arc::new(FileNodeStore::new(&config.state_path));
        let registry = NodeRegistry::open(store, Arc::clone(&logger));
        let tools = ToolClient::new(config, logger)?;
        Ok(Self::new(registry, tools))
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn list_nodes(&self) -> Vec<Node> {
        self.registry.list_nodes()
    }

    pub fn add_node(&mut self, name: &str, url: &str, token: Option<String>) -> McpResult<()> {
        self.registry.add_node(name, url, token)
    }

    pub fn remove_node(&mut self, name: &str) -> McpResult<()> {
        self.registry.remove_node(name)
    }

    pub fn set_active(&mut self, name: &str) -> McpResult<()> {
        self.registry.set_active(name)
    }

    pub fn get_active_node(&self) -> Option<&Node> {
        self.registry.get_active_node()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.registry.active_name()
    }

    /// Tools advertised by `node_name`, or by the active node
    pub fn list_tools(&self, node_name: Option<&str>) -> McpResult<Vec<ToolDescriptor>> {
        let node = self.registry.resolve(node_name)?;
        self.tools.list_tools(node)
    }

    /// Invoke a tool with `payload` and optional caller `context`
    ///
    /// The tool name is checked before the node is resolved, so an empty or
    /// dot-segment name fails the same way whatever the registry holds.
    pub fn invoke_tool(
        &self,
        tool_name: &str,
        payload: Value,
        node_name: Option<&str>,
        context: Option<Value>,
    ) -> McpResult<Value> {
        validate_tool_name(tool_name)?;

        let node = self.registry.resolve(node_name)?;
        let request = ToolRequest::new(payload).with_context(context);
        self.tools.invoke(node, tool_name, &request)
    }
}
