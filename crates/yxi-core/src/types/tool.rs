//! Tool descriptor and request envelope types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tool advertised by a node, kept exactly as the node reported it
///
/// Tool services describe themselves in slightly different ways, so the raw
/// value is preserved and read through lenient accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolDescriptor(Value);

impl ToolDescriptor {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Tool name: `name`, else `id`; a bare string descriptor is its own name
    pub fn name(&self) -> Option<&str> {
        match &self.0 {
            Value::String(name) => Some(name),
            Value::Object(map) => map
                .get("name")
                .and_then(Value::as_str)
                .or_else(|| map.get("id").and_then(Value::as_str)),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    /// JSON Schema of the tool input (`input_schema` or `inputSchema`)
    pub fn input_schema(&self) -> Option<&Value> {
        self.0
            .get("input_schema")
            .or_else(|| self.0.get("inputSchema"))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ToolDescriptor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Request envelope posted to `{url}/tools/{tool}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Tool-specific payload
    pub input: Value,
    /// Optional caller metadata (chat history, mode, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ToolRequest {
    pub fn new(input: Value) -> Self {
        Self { input, context: None }
    }

    pub fn with_context(mut self, context: Option<Value>) -> Self {
        self.context = context;
        self
    }
}
