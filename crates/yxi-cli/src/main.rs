// yxi - MCP node and tool command line
//
// Manages the registered tool nodes (~/.yxi_mcp_nodes.json), lists the tools
// a node offers, and invokes them with a JSON payload. `yxi shell` (the
// default) accepts the same operations as `/mcp` slash commands.

mod command;
mod render;
mod shell;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use yxi_core::logging::{file_logger, log_file_path};
use yxi_core::{ClientConfig, ConsoleLogger, Logger, McpClient, McpError, NoOpLogger};

use crate::render::{render_error, render_json, render_nodes, render_tools};
use crate::shell::Shell;

/// yxi: manage MCP tool nodes and call their tools
#[derive(Parser, Debug)]
#[command(name = "yxi")]
#[command(version)]
#[command(about = "Manage MCP tool nodes and invoke their tools", long_about = None)]
struct Args {
    /// Node state file (default: $YXI_MCP_NODES or ~/.yxi_mcp_nodes.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Per-request timeout in seconds (default: $YXI_MCP_TIMEOUT or 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log registry and client activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage registered nodes
    #[command(subcommand)]
    Nodes(NodeCommands),
    /// List the tools a node advertises
    Tools {
        /// Node to query (default: the active node)
        #[arg(long)]
        node: Option<String>,
    },
    /// Invoke a tool with a JSON payload
    Invoke {
        /// Tool name
        tool: String,
        /// JSON payload sent as the envelope's `input`
        payload: String,
        /// Node to call (default: the active node)
        #[arg(long)]
        node: Option<String>,
        /// JSON value sent as the envelope's `context`
        #[arg(long)]
        context: Option<String>,
    },
    /// Interactive shell with /mcp and /mode commands (default)
    Shell,
}

#[derive(Subcommand, Debug)]
enum NodeCommands {
    /// List nodes; `*` marks the active one
    List,
    /// Register (or replace) a node
    Add {
        name: String,
        url: String,
        token: Option<String>,
    },
    /// Make a node the active one
    Use { name: String },
    /// Remove a node
    Remove { name: String },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<McpError>() {
                Some(mcp) => eprintln!("{}", render_error(mcp)),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(path) = args.state {
        config = config.with_state_path(path);
    }
    if let Some(secs) = args.timeout.filter(|secs| *secs > 0) {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let logger: Arc<dyn Logger> = if args.verbose {
        Arc::new(ConsoleLogger::new().verbose())
    } else {
        Arc::new(NoOpLogger::new())
    };
    if args.verbose && file_logger::is_enabled() {
        logger.info(&format!("Debug trace file: {}", log_file_path().display()));
    }

    let mut client = McpClient::open(&config, logger)?;

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Nodes(NodeCommands::List) => {
            println!("{}", render_nodes(&client.list_nodes(), client.active_name()));
        }
        Commands::Nodes(NodeCommands::Add { name, url, token }) => {
            client.add_node(&name, &url, token)?;
            println!("Added MCP node '{}' -> {}", name, url);
        }
        Commands::Nodes(NodeCommands::Use { name }) => {
            client.set_active(&name)?;
            println!("Active MCP set to '{}'", name);
        }
        Commands::Nodes(NodeCommands::Remove { name }) => {
            client.remove_node(&name)?;
            println!("Removed MCP node '{}'", name);
        }
        Commands::Tools { node } => {
            let tools = client.list_tools(node.as_deref())?;
            println!("{}", render_tools(&tools));
        }
        Commands::Invoke {
            tool,
            payload,
            node,
            context,
        } => {
            let payload = parse_json(&payload).context("Invalid JSON payload")?;
            let context = context
                .as_deref()
                .map(parse_json)
                .transpose()
                .context("Invalid JSON context")?;
            let result = client.invoke_tool(&tool, payload, node.as_deref(), context)?;
            println!("{}", render_json(&result));
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(&mut client);
            shell.run(stdin.lock(), &mut io::stdout(), &mut io::stderr())?;
        }
    }

    Ok(())
}

fn parse_json(raw: &str) -> serde_json::Result<Value> {
    serde_json::from_str(raw)
}
