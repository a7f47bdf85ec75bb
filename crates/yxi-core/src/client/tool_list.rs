//! Decoding of `GET /tools` responses
//!
//! Tool services disagree on how they list tools. Accepted shapes, tried in
//! order:
//! 1. a bare array of descriptors
//! 2. an object whose `tools` member is an array
//! 3. an object whose `tools` member maps tool names to descriptor objects
//!
//! Anything else is read as "no tools" rather than an error.

use serde_json::{Map, Value};

use crate::types::ToolDescriptor;

#[derive(Debug, PartialEq)]
enum ToolListShape {
    Bare(Vec<Value>),
    Wrapped(Vec<Value>),
    Keyed(Map<String, Value>),
    Unrecognized,
}

impl ToolListShape {
    fn classify(payload: Value) -> Self {
        match payload {
            Value::Array(items) => ToolListShape::Bare(items),
            Value::Object(mut doc) => match doc.remove("tools") {
                Some(Value::Array(items)) => ToolListShape::Wrapped(items),
                Some(Value::Object(entries)) if entries.values().all(Value::is_object) => {
                    ToolListShape::Keyed(entries)
                }
                _ => ToolListShape::Unrecognized,
            },
            _ => ToolListShape::Unrecognized,
        }
    }
}

/// Turn a `GET /tools` payload into descriptors
pub fn parse_tool_list(payload: Value) -> Vec<ToolDescriptor> {
    match ToolListShape::classify(payload) {
        ToolListShape::Bare(items) | ToolListShape::Wrapped(items) => {
            items.into_iter().map(ToolDescriptor::new).collect()
        }
        ToolListShape::Keyed(entries) => entries
            .into_iter()
            .map(|(name, mut descriptor)| {
                if let Value::Object(fields) = &mut descriptor {
                    fields.entry("name").or_insert(Value::String(name));
                }
                ToolDescriptor::new(descriptor)
            })
            .collect(),
        ToolListShape::Unrecognized => Vec::new(),
    }
}
