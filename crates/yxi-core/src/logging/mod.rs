//! Logging abstractions
//!
//! - `Logger` implementations are injected into the registry and client.
//! - `file_logger` is an opt-in, process-wide trace file for HTTP exchanges.

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;

pub use file_logger::{log_file_path, LogLevel};

#[cfg(test)]
pub(crate) use traits::testing::RecordingLogger;
