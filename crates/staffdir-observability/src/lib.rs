//! Staffdir Observability
//!
//! Console logging setup shared by the staff directory binaries. Library
//! crates only emit `tracing` events; binaries call [`init_console_logging`]
//! once at startup.
//!
//! # Examples
//!
//! ```no_run
//! use staffdir_config::LogConfig;
//! use staffdir_observability::init_console_logging;
//!
//! init_console_logging(&LogConfig::from_env());
//! tracing::info!("ready");
//! ```

pub mod basic_logging;

pub use basic_logging::{default_directive, init_console_logging};
