//! # Staffdir Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`remote`]: Remote spreadsheet endpoint and photo fallback
//! - [`logging`]: Console log level
//!
//! # Example
//!
//! ```ignore
//! use staffdir_config::{LogConfig, RemoteConfig};
//!
//! dotenvy::dotenv().ok();
//! let remote = RemoteConfig::from_env();
//! let logging = LogConfig::from_env();
//! ```

pub mod logging;
pub mod remote;

// Re-export commonly used types at crate root
pub use logging::LogConfig;
pub use remote::{ConfigError, DEFAULT_FALLBACK_PHOTO_URL, RemoteConfig};
