//! Interactive shell
//!
//! Reads lines from stdin and dispatches:
//! - `/mcp <action> ...`: node management and tool calls
//! - `/mode online|offline [node]`: toggle direct tool input
//! - `/quit`, `/exit`
//! - anything else, while offline: `<tool> <json>` or `<node> <tool> <json>`
//!
//! Results go to `out`; prompts, notices and errors go to `err`.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use yxi_core::{McpClient, McpError, McpResult};

use crate::command::{DirectInvocation, McpCommand};
use crate::render::{render_error, render_json, render_nodes, render_tools};

/// Number of history entries sent as tool context
const HISTORY_WINDOW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Online,
    /// Plain input is a direct tool call against this node
    Offline(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a> {
    client: &'a mut McpClient,
    mode: Mode,
    history: Vec<Value>,
}

impl<'a> Shell<'a> {
    pub fn new(client: &'a mut McpClient) -> Self {
        Self {
            client,
            mode: Mode::Online,
            history: Vec::new(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Value] {
        &self.history
    }

    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        self.prompt(err)?;
        for line in input.lines() {
            if self.handle_line(&line?, out, err)? == Flow::Quit {
                break;
            }
            self.prompt(err)?;
        }
        Ok(())
    }

    fn prompt(&self, err: &mut dyn Write) -> io::Result<()> {
        match self.mode() {
            Mode::Online => write!(err, "yxi> ")?,
            Mode::Offline(node) => write!(err, "yxi[{}]> ", node)?,
        }
        err.flush()
    }

    pub fn handle_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(rest) = strip_command(line, "/mcp") {
            self.mcp_command(rest, out, err)?;
        } else if let Some(rest) = strip_command(line, "/mode") {
            self.mode_command(rest, out, err)?;
        } else if strip_command(line, "/quit").is_some() || strip_command(line, "/exit").is_some() {
            return Ok(Flow::Quit);
        } else if let Mode::Offline(node) = &self.mode {
            let node = node.clone();
            self.direct_invocation(line, &node, out, err)?;
        } else {
            writeln!(
                err,
                "Chat is not available in this shell. Use /mcp ... or /mode offline [node]."
            )?;
        }
        Ok(Flow::Continue)
    }

    fn mcp_command(
        &mut self,
        raw: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let command = match McpCommand::parse(raw) {
            Ok(command) => command,
            Err(e) => return writeln!(err, "{}", e),
        };

        let outcome: McpResult<String> = match command {
            McpCommand::List => Ok(render_nodes(
                &self.client.list_nodes(),
                self.client.active_name(),
            )),
            McpCommand::Add { name, url, token } => self
                .client
                .add_node(&name, &url, token)
                .map(|_| format!("Added MCP node '{}' -> {}", name, url)),
            McpCommand::Use { name } => self
                .client
                .set_active(&name)
                .map(|_| format!("Active MCP set to '{}'", name)),
            McpCommand::Remove { name } => self.client.remove_node(&name).map(|_| {
                if self.mode == Mode::Offline(name.clone()) {
                    self.mode = Mode::Online;
                    format!("Removed MCP node '{}' (back to online mode)", name)
                } else {
                    format!("Removed MCP node '{}'", name)
                }
            }),
            McpCommand::Tools { node } => self
                .client
                .list_tools(node.as_deref())
                .map(|tools| render_tools(&tools)),
            McpCommand::Invoke { tool, payload } => {
                let context = json!({ "chat_history": self.recent_history() });
                self.client
                    .invoke_tool(&tool, payload, None, Some(context))
                    .map(|result| {
                        let formatted = render_json(&result);
                        self.remember("assistant", format!("[MCP:{}]\n{}", tool, formatted));
                        formatted
                    })
            }
        };

        match outcome {
            Ok(text) => writeln!(out, "{}", text),
            Err(e) => writeln!(err, "{}", render_error(&e)),
        }
    }

    fn mode_command(
        &mut self,
        raw: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let mut parts = raw.split_whitespace();
        let Some(target) = parts.next() else {
            let current = match &self.mode {
                Mode::Online => "online (offline node: not set)".to_string(),
                Mode::Offline(node) => format!("offline (node: {})", node),
            };
            writeln!(out, "Current mode: {}", current)?;
            return writeln!(err, "Usage: /mode online | /mode offline <node_name>");
        };

        match target.to_lowercase().as_str() {
            "online" => {
                self.mode = Mode::Online;
                writeln!(out, "Switched to online mode.")
            }
            "offline" => {
                let node = parts
                    .next()
                    .map(str::to_string)
                    .or_else(|| self.client.active_name().map(str::to_string));
                match node {
                    None => writeln!(err, "Specify a node: /mode offline <node_name>"),
                    Some(node) if !self.client.registry().contains(&node) => {
                        writeln!(err, "Unknown MCP node: {}", node)
                    }
                    Some(node) => {
                        writeln!(out, "Switched to offline mode targeting MCP '{}'.", node)?;
                        self.mode = Mode::Offline(node);
                        Ok(())
                    }
                }
            }
            _ => writeln!(err, "Unknown mode. Use 'online' or 'offline'."),
        }
    }

    fn direct_invocation(
        &mut self,
        line: &str,
        offline_node: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let invocation = match DirectInvocation::parse(line) {
            Ok(invocation) => invocation,
            Err(e) => return writeln!(err, "{}", e),
        };
        let node = invocation.node.unwrap_or_else(|| offline_node.to_string());
        if !self.client.registry().contains(&node) {
            return writeln!(err, "{}", render_error(&McpError::not_found(&node)));
        }

        self.remember("user", line.to_string());
        let context = json!({ "mode": "offline", "chat_history": self.recent_history() });

        match self
            .client
            .invoke_tool(&invocation.tool, invocation.payload, Some(&node), Some(context))
        {
            Ok(result) => {
                let formatted = render_json(&result);
                writeln!(out, "{}", formatted)?;
                self.remember(
                    "assistant",
                    format!("[MCP:{}@{}]\n{}", invocation.tool, node, formatted),
                );
                Ok(())
            }
            Err(e) => writeln!(err, "{}", render_error(&e)),
        }
    }

    fn remember(&mut self, role: &str, content: String) {
        self.history.push(json!({ "role": role, "content": content }));
    }

    fn recent_history(&self) -> Value {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        Value::Array(self.history[start..].to_vec())
    }
}

/// `line` minus a leading `command` word, matched case-insensitively
fn strip_command<'l>(line: &'l str, command: &str) -> Option<&'l str> {
    let head = line.get(..command.len())?;
    let rest = &line[command.len()..];
    let at_boundary = rest.is_empty() || rest.starts_with(char::is_whitespace);
    if head.eq_ignore_ascii_case(command) && at_boundary {
        Some(rest.trim())
    } else {
        None
    }
}
