//! File-based node store (JSON)

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::traits::{NodeStore, StoreResult};
use crate::types::NodeState;

const STATE_FILE_NAME: &str = ".yxi_mcp_nodes.json";

/// Node state persisted as a single JSON file
///
/// Every save rewrites the whole file. There is no locking: with several
/// processes the last writer wins.
///
/// # Example
///
/// ```no_run
/// use yxi_core::store::{FileNodeStore, NodeStore};
///
/// let store = FileNodeStore::new(FileNodeStore::default_path());
/// let state = store.load()?;
/// # Ok::<(), yxi_core::store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileNodeStore {
    path: PathBuf,
}

impl FileNodeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.yxi_mcp_nodes.json`, or the current directory when there is no home
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STATE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl NodeStore for FileNodeStore {
    fn load(&self) -> StoreResult<NodeState> {
        if !self.path.exists() {
            return Ok(NodeState::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        Ok(NodeState::from_value(value))
    }

    fn save(&self, state: &NodeState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
