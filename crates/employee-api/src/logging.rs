//! Tracing subscriber initialization.
//!
//! The level is controlled by `RUST_LOG`, for example:
//!
//! ```bash
//! RUST_LOG=employee_api=debug,tower_http=debug,sqlx=warn cargo run
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize human-readable logging (development).
///
/// Defaults to `info` when `RUST_LOG` is unset.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Call it once at
/// startup.
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Initialize human-readable logging with a fallback level used when
/// `RUST_LOG` is unset.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize JSON-formatted logging (production).
///
/// One JSON object per line, ready for log aggregation.
pub fn init_logging_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
