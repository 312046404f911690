use staffdir_config::LogConfig;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crate targets whose level follows `LOG_LEVEL`.
const OWN_TARGETS: [&str; 4] = [
    "staffdir",
    "staffdir_cli",
    "staffdir_models",
    "staffdir_core",
];

/// Builds the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(config: &LogConfig) -> String {
    OWN_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, config.level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize compact console logging.
///
/// - **Log Level**: `RUST_LOG` if set, otherwise `LOG_LEVEL` (default: "info")
///   applied to the staffdir crates
/// - **Format**: Compact, with targets and ANSI colors, written to stderr so
///   command output on stdout stays clean
///
/// Safe to call more than once; later calls are ignored.
pub fn init_console_logging(config: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
