use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level for the crate's own targets when `RUST_LOG` is unset.
    pub level: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL")
                .ok()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "info".to_string()),
        }
    }
}
