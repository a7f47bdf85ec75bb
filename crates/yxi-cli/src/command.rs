//! Slash command and offline input grammar
//!
//! `/mcp <action> ...` lines and offline-mode `<tool> <json>` lines are parsed
//! into typed commands before anything touches the client.

use serde_json::Value;
use thiserror::Error;

pub const MCP_USAGE: &str = "/mcp <add|list|use|remove|tools|invoke> ...";
pub const ADD_USAGE: &str = "/mcp add <name> <url> [token]";
pub const USE_USAGE: &str = "/mcp use <name>";
pub const REMOVE_USAGE: &str = "/mcp remove <name>";
pub const INVOKE_USAGE: &str = "/mcp invoke <tool_name> <json_payload>";
pub const OFFLINE_USAGE: &str = "<tool> <json> or <node> <tool> <json>";

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown MCP action: {0}")]
    UnknownAction(String),

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),
}

/// A parsed `/mcp` command
#[derive(Debug, Clone, PartialEq)]
pub enum McpCommand {
    List,
    Add {
        name: String,
        url: String,
        token: Option<String>,
    },
    Use {
        name: String,
    },
    Remove {
        name: String,
    },
    Tools {
        node: Option<String>,
    },
    Invoke {
        tool: String,
        payload: Value,
    },
}

impl McpCommand {
    /// Parse the text following `/mcp`
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CommandError::Usage(MCP_USAGE));
        }

        let (action, remainder) = split_first(raw);
        match action.to_lowercase().as_str() {
            "list" => Ok(McpCommand::List),
            "add" => {
                let mut parts = remainder.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(name), Some(url)) => Ok(McpCommand::Add {
                        name: name.to_string(),
                        url: url.to_string(),
                        token: parts.next().map(str::to_string),
                    }),
                    _ => Err(CommandError::Usage(ADD_USAGE)),
                }
            }
            "use" | "select" => {
                non_empty(remainder, USE_USAGE).map(|name| McpCommand::Use { name })
            }
            "remove" => {
                non_empty(remainder, REMOVE_USAGE).map(|name| McpCommand::Remove { name })
            }
            "tools" => Ok(McpCommand::Tools {
                node: non_empty(remainder, MCP_USAGE).ok(),
            }),
            "invoke" | "run" | "call" => {
                let (tool, payload) = split_first(remainder);
                if tool.is_empty() || payload.is_empty() {
                    return Err(CommandError::Usage(INVOKE_USAGE));
                }
                Ok(McpCommand::Invoke {
                    tool: tool.to_string(),
                    payload: parse_payload(payload)?,
                })
            }
            _ => Err(CommandError::UnknownAction(action.to_string())),
        }
    }
}

/// A tool call typed directly while offline
#[derive(Debug, Clone, PartialEq)]
pub struct DirectInvocation {
    /// Explicit node; `None` means the session's offline node
    pub node: Option<String>,
    pub tool: String,
    pub payload: Value,
}

impl DirectInvocation {
    /// Parse `<tool> <json>` or `<node> <tool> <json>`
    ///
    /// The two-word form wins whenever everything after the first word is
    /// valid JSON, so payloads containing spaces are never mistaken for a
    /// tool name.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let (first, rest) = split_first(line.trim());
        if first.is_empty() || rest.is_empty() {
            return Err(CommandError::Usage(OFFLINE_USAGE));
        }

        let two_word_error = match serde_json::from_str::<Value>(rest) {
            Ok(payload) => {
                return Ok(Self {
                    node: None,
                    tool: first.to_string(),
                    payload,
                })
            }
            Err(e) => e,
        };

        let (tool, payload) = split_first(rest);
        if payload.is_empty() {
            // `<tool> <not-json>`: report the JSON problem, not the grammar
            return Err(CommandError::InvalidJson(two_word_error.to_string()));
        }
        Ok(Self {
            node: Some(first.to_string()),
            tool: tool.to_string(),
            payload: parse_payload(payload)?,
        })
    }
}

fn split_first(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

fn non_empty(text: &str, usage: &'static str) -> Result<String, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(text.to_string())
    }
}

fn parse_payload(raw: &str) -> Result<Value, CommandError> {
    serde_json::from_str(raw).map_err(|e| CommandError::InvalidJson(e.to_string()))
}
