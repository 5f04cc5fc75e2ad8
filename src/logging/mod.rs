//! Structured logging setup
//!
//! Diagnostics go to stderr through `tracing` so that stdout carries only the
//! summary line (or the manifest itself with `--stdout`). `RUST_LOG` takes
//! precedence over the verbosity flag when set.

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,
    /// Emit JSON lines instead of human-readable output
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
        }
    }
}

impl LoggingConfig {
    /// Map a `-v` count to a level: 0 warn, 1 info, 2 debug, 3+ trace
    pub fn from_verbosity(verbose: u8, use_json: bool) -> Self {
        let level = match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self { level, use_json }
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(format!(
        "warn,geomanifest={}",
        config.level.as_str().to_lowercase()
    ))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(&config);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .init();
        }
    });
}
