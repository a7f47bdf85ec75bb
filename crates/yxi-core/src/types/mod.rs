//! Core data types

mod node;
mod tool;

pub use node::{Node, NodeState};
pub(crate) use node::normalize_url;
pub use tool::{ToolDescriptor, ToolRequest};
