//! Tool client
//!
//! Discovers and invokes tools on registered nodes over plain HTTP/JSON.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  McpClient                   │
//! │   - NodeRegistry (resolve)   │
//! │   - ToolClient (HTTP)        │
//! └──────────────────────────────┘
//!           │
//!           │ GET  /tools
//!           │ POST /tools/{name}  {"input": ..., "context": ...}
//!           ▼
//! ┌──────────────────────────────┐
//! │  Tool node (word tables,     │
//! │  json->java, ui tests, notes)│
//! └──────────────────────────────┘
//! ```

mod http;
mod mcp_client;
mod tool_list;

#[cfg(test)]
mod test_server;

pub use http::ToolClient;
pub use mcp_client::McpClient;
pub use tool_list::parse_tool_list;
