//! Console logger implementation

use super::traits::Logger;

/// A logger that writes to stderr
///
/// stdout is left alone so tool results can be piped.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    debug: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default prefix, debug messages hidden
    pub fn new() -> Self {
        Self {
            prefix: "[yxi]".to_string(),
            debug: false,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            debug: false,
        }
    }

    /// Also emit debug messages
    pub fn verbose(mut self) -> Self {
        self.debug = true;
        self
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if self.debug {
            eprintln!("{} DEBUG: {}", self.prefix, message);
        }
    }

    fn info(&self, message: &str) {
        eprintln!("{} INFO: {}", self.prefix, message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} WARN: {}", self.prefix, message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} ERROR: {}", self.prefix, message);
    }
}
