//! Client configuration
//!
//! Settings come from defaults, then environment variables, then whatever
//! the caller sets explicitly:
//! - `YXI_MCP_NODES`: path of the node state file
//! - `YXI_MCP_TIMEOUT`: per-request timeout in whole seconds

use std::path::PathBuf;
use std::time::Duration;

use crate::store::FileNodeStore;

/// Ceiling applied to every node request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const STATE_PATH_ENV: &str = "YXI_MCP_NODES";
pub const TIMEOUT_ENV: &str = "YXI_MCP_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Where the node registry is persisted
    pub state_path: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            state_path: FileNodeStore::default_path(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the environment; unparsable values are ignored
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(STATE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.state_path = PathBuf::from(path.trim());
        }

        if let Some(secs) = lookup(TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.state_path, FileNodeStore::default_path());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (STATE_PATH_ENV, "/tmp/yxi/nodes.json"),
            (TIMEOUT_ENV, " 5 "),
        ]));
        assert_eq!(config.state_path, PathBuf::from("/tmp/yxi/nodes.json"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            (STATE_PATH_ENV, "   "),
            (TIMEOUT_ENV, "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());

        let zero = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(zero.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_state_path("nodes.json")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.state_path, PathBuf::from("nodes.json"));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
