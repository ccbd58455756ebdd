//! Logger setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// `parlor-server` becomes `parlor_server=debug,tower_http=debug`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    format!(
        "{}={},tower_http={}",
        bin_name.replace('-', "_"),
        level,
        level
    )
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default directive.
/// Calling this twice is harmless: the second install is ignored.
pub fn setup_logger(bin_name: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(true).with_target(true))
        .try_init();
}
