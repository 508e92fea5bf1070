//! Logging utilities.
//!
//! Native builds log through `env_logger`; wasm builds log to the browser
//! console. Either way the crate only talks to the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
