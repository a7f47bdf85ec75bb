//! In-memory node store

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::traits::{NodeStore, StoreError, StoreResult};
use crate::types::NodeState;

/// In-memory node store for tests and hosts that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    state: RwLock<NodeState>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that starts out holding `state`
    pub fn with_state(state: NodeState) -> Self {
        Self {
            state: RwLock::new(state),
            ..Self::default()
        }
    }

    /// Last saved (or initial) state
    pub fn snapshot(&self) -> NodeState {
        self.state.read().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every following save fail (simulates a read-only disk)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl NodeStore for MemoryNodeStore {
    fn load(&self) -> StoreResult<NodeState> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &NodeState) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Other("memory store is read-only".to_string()));
        }
        *self.state.write() = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
