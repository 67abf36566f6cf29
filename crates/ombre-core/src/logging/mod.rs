//! Logging utilities.
//!
//! Centralizes logger initialization for binaries embedding the picker.
//! Library code only uses the `log` facade; nothing here forces a backend
//! on the host application.

mod init;

pub use init::{init_logging, LoggingConfig};
