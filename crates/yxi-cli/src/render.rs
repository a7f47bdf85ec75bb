//! Plain-text rendering of nodes, tools, results and errors

use serde_json::Value;
use yxi_core::{McpError, Node, ToolDescriptor};

pub fn render_nodes(nodes: &[Node], active: Option<&str>) -> String {
    if nodes.is_empty() {
        return "No MCP nodes configured. Use /mcp add <name> <url>".to_string();
    }

    nodes
        .iter()
        .map(|node| {
            let marker = if Some(node.name.as_str()) == active { "*" } else { " " };
            let token_hint = if node.has_token() { " (token)" } else { "" };
            format!("{} {} -> {}{}", marker, node.name, node.url, token_hint)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_tools(tools: &[ToolDescriptor]) -> String {
    if tools.is_empty() {
        return "No tools reported by the MCP node.".to_string();
    }

    tools
        .iter()
        .map(|tool| match (tool.as_value(), tool.name()) {
            (Value::Object(_), name) => {
                let name = name.unwrap_or("unnamed");
                match tool.description() {
                    Some(desc) if !desc.is_empty() => format!("{} - {}", name, desc),
                    _ => name.to_string(),
                }
            }
            (_, Some(name)) => name.to_string(),
            (other, None) => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn render_error(err: &McpError) -> String {
    format!("{}: {}", err.kind(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_nodes() {
        let nodes = vec![
            Node::new("java", "http://localhost:8030", None),
            Node::new("notes", "http://localhost:8040/", Some("t".into())),
        ];
        assert_eq!(
            render_nodes(&nodes, Some("notes")),
            "  java -> http://localhost:8030\n* notes -> http://localhost:8040 (token)"
        );
        assert!(render_nodes(&[], None).starts_with("No MCP nodes configured"));
    }

    #[test]
    fn test_render_tools() {
        let tools = vec![
            ToolDescriptor::new(json!({ "name": "search_notes", "description": "Search notes" })),
            ToolDescriptor::new(json!({ "id": "append_note" })),
            ToolDescriptor::new(json!({ "description": "mystery" })),
            ToolDescriptor::new(json!("run_ui_test")),
            ToolDescriptor::new(json!(7)),
        ];
        assert_eq!(
            render_tools(&tools),
            "search_notes - Search notes\nappend_note\nunnamed - mystery\nrun_ui_test\n7"
        );
        assert_eq!(render_tools(&[]), "No tools reported by the MCP node.");
    }

    #[test]
    fn test_render_error() {
        assert_eq!(
            render_error(&McpError::not_found("ghost")),
            "NotFound: MCP node 'ghost' not found"
        );
        assert_eq!(
            render_error(&McpError::NoActiveNode),
            "NoActiveNode: No active MCP node configured"
        );
    }
}
