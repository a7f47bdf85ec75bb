//! Node registry: named tool endpoints plus the active selection

use std::sync::Arc;

use crate::error::{McpError, McpResult};
use crate::logging::SharedLogger;
use crate::store::{load_or_default, NodeStore};
use crate::types::{normalize_url, Node, NodeState};

/// Authoritative, persisted set of nodes
///
/// Every mutation is computed on a copy of the state, written through the
/// store, and only then applied in memory, so a failed save leaves the
/// registry exactly as it was.
///
/// Invariants:
/// - node names are unique (case-sensitive)
/// - the active name, when set, names a registered node
///
/// Not synchronized; hosts sharing a registry across threads wrap it in a
/// mutex.
pub struct NodeRegistry {
    store: Arc<dyn NodeStore>,
    state: NodeState,
    logger: SharedLogger,
}

impl NodeRegistry {
    /// Open a registry backed by `store`
    ///
    /// Unreadable persisted state is treated as an empty registry.
    pub fn open(store: Arc<dyn NodeStore>, logger: SharedLogger) -> Self {
        let state = load_or_default(store.as_ref(), logger.as_ref());
        crate::log_debug!(
            logger,
            "[NodeRegistry] Loaded {} node(s) from {}",
            state.nodes.len(),
            store.describe()
        );
        Self { store, state, logger }
    }

    /// All nodes, sorted by name case-insensitively
    pub fn list_nodes(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self.state.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));
        nodes
    }

    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.state.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.nodes.contains_key(name)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.state.active.as_deref()
    }

    pub fn len(&self) -> usize {
        self.state.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.nodes.is_empty()
    }

    /// Register a node, replacing any node with the same name
    ///
    /// The first node added to a registry without an active node becomes
    /// active.
    pub fn add_node(&mut self, name: &str, url: &str, token: Option<String>) -> McpResult<()> {
        if name.trim().is_empty() || normalize_url(url).is_empty() {
            return Err(McpError::invalid_argument("Both name and URL are required"));
        }

        let node = Node::new(name, url, token);
        let mut next = self.state.clone();
        let replaced = next.nodes.insert(name.to_string(), node).is_some();
        if next.active.is_none() {
            next.active = Some(name.to_string());
        }

        self.commit(next)?;
        crate::log_info!(
            self.logger,
            "[NodeRegistry] {} node '{}'",
            if replaced { "Replaced" } else { "Added" },
            name
        );
        Ok(())
    }

    /// Remove a node
    ///
    /// Removing the active node hands the selection to the first remaining
    /// node in `list_nodes` order, or clears it when none remain.
    pub fn remove_node(&mut self, name: &str) -> McpResult<()> {
        if !self.contains(name) {
            return Err(McpError::not_found(name));
        }

        let mut next = self.state.clone();
        next.nodes.remove(name);
        if next.active.as_deref() == Some(name) {
            next.active = next
                .nodes
                .keys()
                .min_by(|a, b| sort_key(a).cmp(&sort_key(b)))
                .cloned();
        }

        self.commit(next)?;
        crate::log_info!(self.logger, "[NodeRegistry] Removed node '{}'", name);
        Ok(())
    }

    pub fn set_active(&mut self, name: &str) -> McpResult<()> {
        if !self.contains(name) {
            return Err(McpError::not_found(name));
        }

        let mut next = self.state.clone();
        next.active = Some(name.to_string());

        self.commit(next)?;
        crate::log_info!(self.logger, "[NodeRegistry] Active node set to '{}'", name);
        Ok(())
    }

    pub fn get_active_node(&self) -> Option<&Node> {
        self.state
            .active
            .as_deref()
            .and_then(|name| self.state.nodes.get(name))
    }

    /// Pick the target node for a tool operation
    ///
    /// An explicit, non-empty name must be registered; otherwise the active
    /// node is used.
    pub fn resolve(&self, node_name: Option<&str>) -> McpResult<&Node> {
        match node_name.filter(|n| !n.is_empty()) {
            Some(name) => self.get_node(name).ok_or_else(|| McpError::not_found(name)),
            None => self.get_active_node().ok_or(McpError::NoActiveNode),
        }
    }

    fn commit(&mut self, next: NodeState) -> McpResult<()> {
        if let Err(e) = self.store.save(&next) {
            crate::log_error!(
                self.logger,
                "[NodeRegistry] Failed to save node state to {}: {}",
                self.store.describe(),
                e
            );
            return Err(e.into());
        }
        self.state = next;
        Ok(())
    }
}

fn sort_key(name: &str) -> (String, &str) {
    (name.to_lowercase(), name)
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("store", &self.store.describe())
            .field("active", &self.state.active)
            .field("nodes", &self.state.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Logger, NoOpLogger};
    use crate::store::{FileNodeStore, MemoryNodeStore};
    use tempfile::tempdir;

    fn memory_registry() -> (Arc<MemoryNodeStore>, NodeRegistry) {
        let store = Arc::new(MemoryNodeStore::new());
        let registry = NodeRegistry::open(store.clone(), Arc::new(NoOpLogger::new()));
        (store, registry)
    }

    #[test]
    fn test_first_node_becomes_active() {
        let (store, mut registry) = memory_registry();
        registry.add_node("local", "http://localhost:9999/", None).unwrap();

        let nodes = registry.list_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "local");
        assert_eq!(nodes[0].url, "http://localhost:9999");
        assert!(nodes[0].token.is_none());
        assert_eq!(registry.active_name(), Some("local"));
        assert_eq!(registry.get_active_node().map(|n| n.name.as_str()), Some("local"));
        assert_eq!(store.save_count(), 1);

        // Later additions leave the selection alone
        registry.add_node("java", "http://localhost:8030", None).unwrap();
        assert_eq!(registry.active_name(), Some("local"));
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let (store, mut registry) = memory_registry();

        for (name, url) in [("", "http://a"), ("  ", "http://a"), ("a", ""), ("a", "///")] {
            let err = registry.add_node(name, url, None).unwrap_err();
            assert!(matches!(err, McpError::InvalidArgument(_)), "{name:?} {url:?}");
        }
        assert!(registry.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_add_overwrites_existing_node() {
        let (_store, mut registry) = memory_registry();
        registry.add_node("word", "http://localhost:8000", Some("old".into())).unwrap();
        registry.add_node("word", "http://10.0.0.5:8000/", None).unwrap();

        assert_eq!(registry.len(), 1);
        let node = registry.get_node("word").unwrap();
        assert_eq!(node.url, "http://10.0.0.5:8000");
        assert!(node.token.is_none());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (_store, mut registry) = memory_registry();
        registry.add_node("Word", "http://a", None).unwrap();
        registry.add_node("word", "http://b", None).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.resolve(Some("WORD")).is_err());
    }

    #[test]
    fn test_list_sorted_case_insensitively() {
        let (_store, mut registry) = memory_registry();
        for name in ["obsidian", "Java", "word", "alpha"] {
            registry.add_node(name, "http://localhost", None).unwrap();
        }

        let names: Vec<String> = registry.list_nodes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["alpha", "Java", "obsidian", "word"]);
    }

    #[test]
    fn test_remove_active_falls_back() {
        let (_store, mut registry) = memory_registry();
        registry.add_node("local", "http://localhost:9999", None).unwrap();
        registry.add_node("remote", "https://tools.example.com", None).unwrap();

        registry.remove_node("local").unwrap();
        assert_eq!(registry.active_name(), Some("remote"));

        registry.remove_node("remote").unwrap();
        assert!(registry.active_name().is_none());
        assert!(registry.get_active_node().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_fallback_is_first_in_list_order() {
        let (_store, mut registry) = memory_registry();
        for name in ["main", "zeta", "Beta", "alpha"] {
            registry.add_node(name, "http://localhost", None).unwrap();
        }
        assert_eq!(registry.active_name(), Some("main"));

        registry.remove_node("main").unwrap();
        assert_eq!(registry.active_name(), Some("alpha"));
    }

    #[test]
    fn test_remove_inactive_keeps_selection() {
        let (_store, mut registry) = memory_registry();
        registry.add_node("a", "http://a", None).unwrap();
        registry.add_node("b", "http://b", None).unwrap();

        registry.remove_node("b").unwrap();
        assert_eq!(registry.active_name(), Some("a"));
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let (store, mut registry) = memory_registry();
        let err = registry.remove_node("ghost").unwrap_err();
        assert!(matches!(err, McpError::NotFound(ref n) if n == "ghost"));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_set_active_unknown_leaves_state() {
        let (store, mut registry) = memory_registry();
        registry.add_node("a", "http://a", None).unwrap();

        let err = registry.set_active("ghost").unwrap_err();
        assert!(matches!(err, McpError::NotFound(_)));
        assert_eq!(registry.active_name(), Some("a"));
        assert_eq!(registry.list_nodes().len(), 1);
        assert_eq!(store.save_count(), 1);

        registry.add_node("b", "http://b", None).unwrap();
        registry.set_active("b").unwrap();
        assert_eq!(registry.active_name(), Some("b"));
        assert_eq!(store.snapshot().active.as_deref(), Some("b"));
    }

    #[test]
    fn test_failed_save_leaves_registry_unchanged() {
        let (store, mut registry) = memory_registry();
        registry.add_node("a", "http://a", None).unwrap();
        store.set_fail_saves(true);

        assert!(matches!(
            registry.add_node("b", "http://b", None),
            Err(McpError::Store(_))
        ));
        assert!(matches!(registry.remove_node("a"), Err(McpError::Store(_))));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_name(), Some("a"));
    }

    #[test]
    fn test_resolve() {
        let (_store, mut registry) = memory_registry();
        assert!(matches!(registry.resolve(None), Err(McpError::NoActiveNode)));

        registry.add_node("a", "http://a", None).unwrap();
        registry.add_node("b", "http://b", None).unwrap();

        assert_eq!(registry.resolve(None).unwrap().name, "a");
        assert_eq!(registry.resolve(Some("")).unwrap().name, "a");
        assert_eq!(registry.resolve(Some("b")).unwrap().name, "b");
        assert!(matches!(
            registry.resolve(Some("ghost")),
            Err(McpError::NotFound(ref n)) if n == "ghost"
        ));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());

        let mut registry = NodeRegistry::open(Arc::new(FileNodeStore::new(&path)), logger.clone());
        registry.add_node("word", "http://localhost:8000/", None).unwrap();
        registry.add_node("Obsidian", "http://localhost:8040", Some("vault".into())).unwrap();
        registry.set_active("Obsidian").unwrap();

        let reopened = NodeRegistry::open(Arc::new(FileNodeStore::new(&path)), logger);
        assert_eq!(reopened.list_nodes(), registry.list_nodes());
        assert_eq!(reopened.active_name(), Some("Obsidian"));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut registry = NodeRegistry::open(
            Arc::new(FileNodeStore::new(&path)),
            Arc::new(NoOpLogger::new()),
        );
        assert!(registry.is_empty());

        // The next mutation replaces the corrupt file
        registry.add_node("a", "http://a", None).unwrap();
        let reopened = NodeRegistry::open(
            Arc::new(FileNodeStore::new(&path)),
            Arc::new(NoOpLogger::new()),
        );
        assert_eq!(reopened.len(), 1);
    }
}
