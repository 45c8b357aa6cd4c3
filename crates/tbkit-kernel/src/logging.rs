//! Tracing subscriber initialization

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Call once at startup; safe to call multiple times. Verbosity follows
/// `RUST_LOG`, e.g. `RUST_LOG=tbkit_kernel=trace` to watch the construction
/// protocol; defaults to `info`.
pub fn init() {
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}
