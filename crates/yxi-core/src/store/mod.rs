//! Node state persistence
//!
//! - `FileNodeStore`: JSON file, rewritten after every registry mutation
//! - `MemoryNodeStore`: In-memory for testing

mod traits;
mod memory;
mod file;

pub use traits::{load_or_default, NodeStore, StoreError, StoreResult};
pub use memory::MemoryNodeStore;
pub use file::FileNodeStore;
