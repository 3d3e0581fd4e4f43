//! Logging utilities.
//!
//! Centralizes logger initialization over the standard `log` facade. Both
//! the debug channel and user-facing messages end up as newline-terminated
//! text on standard error.

mod init;

pub use init::{init_logging, LogConfig};
