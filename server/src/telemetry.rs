//! Logging setup.
//!
//! `RUST_LOG` controls verbosity, e.g. `RUST_LOG=debug` or
//! `RUST_LOG=todo_core=debug,tower_http=warn`. Without it, service and
//! access logs are shown at `info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "todo_server=info,todo_core=info,tower_http=info";

/// Install the global subscriber. Call once, at startup.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
