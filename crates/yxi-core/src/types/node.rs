//! Node and persisted registry state types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered remote tool endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, case-sensitive registry key
    pub name: String,
    /// Base URL without trailing slash
    pub url: String,
    /// Bearer token sent with every request when present
    pub token: Option<String>,
}

impl Node {
    /// Create a node, normalizing the url and token
    ///
    /// Trailing `/` characters are stripped from `url`; an empty or
    /// whitespace-only token counts as no token.
    pub fn new(name: impl Into<String>, url: impl AsRef<str>, token: Option<String>) -> Self {
        Self {
            name: name.into(),
            url: normalize_url(url.as_ref()),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

pub(crate) fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Persisted registry document
///
/// ```json
/// {
///   "active": "local",
///   "nodes": {
///     "local": { "name": "local", "url": "http://localhost:9999", "token": null }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub active: Option<String>,
    #[serde(default)]
    pub nodes: BTreeMap<String, Node>,
}

impl NodeState {
    /// Decode a persisted document, keeping whatever is usable
    ///
    /// A document that is not an object is empty. Node entries that are not
    /// objects or have no usable `url` are skipped, and the map key wins over
    /// any inner `name`. `active` survives only if it names a kept node.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut doc) = value else {
            return Self::default();
        };

        let mut nodes = BTreeMap::new();
        if let Some(Value::Object(entries)) = doc.remove("nodes") {
            for (name, meta) in entries {
                let Value::Object(meta) = meta else {
                    continue;
                };
                let url = match meta.get("url").and_then(Value::as_str) {
                    Some(url) if !normalize_url(url).is_empty() => url,
                    _ => continue,
                };
                let token = meta.get("token").and_then(Value::as_str).map(str::to_string);
                let node = Node::new(name.clone(), url, token);
                nodes.insert(name, node);
            }
        }

        let active = match doc.remove("active") {
            Some(Value::String(name)) if nodes.contains_key(&name) => Some(name),
            _ => None,
        };

        Self { active, nodes }
    }
}
