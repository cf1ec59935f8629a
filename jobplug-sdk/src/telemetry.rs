//! Logging setup
//!
//! Logs go to stderr. Stdout belongs to the handshake line.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once keeps the first subscriber.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
