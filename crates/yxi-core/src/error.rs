//! Error taxonomy shared by the registry and the tool client

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by registry and tool operations
#[derive(Error, Debug)]
pub enum McpError {
    /// Empty or otherwise unusable caller input; raised before any I/O
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Named node is not registered
    #[error("MCP node '{0}' not found")]
    NotFound(String),

    /// No explicit node given and no active node set
    #[error("No active MCP node configured")]
    NoActiveNode,

    /// Transport failure or non-2xx status. Never retried here.
    #[error("Network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not valid JSON
    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Node state could not be persisted
    #[error("Failed to persist node state: {0}")]
    Store(#[from] StoreError),
}

impl McpError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub(crate) fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Stable short name of the error kind, for display
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::NotFound(_) => "NotFound",
            Self::NoActiveNode => "NoActiveNode",
            Self::Network { .. } => "NetworkError",
            Self::MalformedResponse { .. } => "MalformedResponse",
            Self::Store(_) => "StoreError",
        }
    }

    /// HTTP status of a failed exchange, when the node answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
