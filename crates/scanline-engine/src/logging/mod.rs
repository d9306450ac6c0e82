//! Logger initialization.
//!
//! Engine code logs through the `log` facade only. Binaries call
//! [`init_logging`] once to route those records to `env_logger`.

mod init;

pub use init::{LoggingConfig, init_logging};
