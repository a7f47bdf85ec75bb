//! Node registry
//!
//! Tracks named tool endpoints ("nodes") and which one is active. Owned by
//! whatever runs the session; persisted through a `NodeStore` after every
//! change.
//!
//! ```rust,ignore
//! use yxi_core::registry::NodeRegistry;
//! use yxi_core::store::FileNodeStore;
//!
//! let mut registry = NodeRegistry::open(Arc::new(FileNodeStore::new(path)), logger);
//! registry.add_node("word", "http://localhost:8000/", None)?;
//! registry.set_active("word")?;
//! ```

mod nodes;

pub use nodes::NodeRegistry;
