//! yxi Core
//!
//! MCP node registry and tool client for the yxi chat CLI.
//!
//! A *node* is a named remote tool service (base URL plus optional bearer
//! token). The registry persists nodes and the active selection to a local
//! JSON file; the client lists and invokes tools on a node through a fixed
//! JSON envelope.
//!
//! ```rust,ignore
//! use yxi_core::{ClientConfig, McpClient, NoOpLogger};
//!
//! let mut client = McpClient::open(&ClientConfig::from_env(), Arc::new(NoOpLogger::new()))?;
//! client.add_node("word", "http://localhost:8000/", None)?;
//!
//! let tools = client.list_tools(None)?;
//! let result = client.invoke_tool("export_tables", json!({ "path": "report.docx" }), None, None)?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod store;
pub mod types;

pub use client::{McpClient, ToolClient};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{McpError, McpResult};
pub use logging::{ConsoleLogger, Logger, NoOpLogger};
pub use registry::NodeRegistry;
pub use store::{FileNodeStore, MemoryNodeStore, NodeStore, StoreError};
pub use types::{Node, NodeState, ToolDescriptor, ToolRequest};
