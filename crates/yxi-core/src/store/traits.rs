//! Node store trait

use crate::logging::Logger;
use crate::types::NodeState;

/// Persistence backend for the node registry
///
/// Implementations:
/// - `FileNodeStore`: JSON file (`~/.yxi_mcp_nodes.json` by default)
/// - `MemoryNodeStore`: In-memory for testing and embedding
pub trait NodeStore: Send + Sync {
    /// Read the persisted state
    fn load(&self) -> StoreResult<NodeState>;

    /// Replace the persisted state entirely
    fn save(&self, state: &NodeState) -> StoreResult<()>;

    /// Human-readable location, for log messages
    fn describe(&self) -> String;
}

/// Errors that can occur while reading or writing node state
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Load state, treating any failure as an empty registry
///
/// The state file is a local convenience cache; a missing, unreadable or
/// corrupt file must not keep the client from starting.
pub fn load_or_default(store: &dyn NodeStore, logger: &dyn Logger) -> NodeState {
    match store.load() {
        Ok(state) => state,
        Err(e) => {
            crate::log_warn!(
                logger,
                "[NodeStore] Ignoring unreadable node state at {}: {}",
                store.describe(),
                e
            );
            NodeState::default()
        }
    }
}
