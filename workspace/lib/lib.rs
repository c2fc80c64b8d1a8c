//! Helpers shared by the driver binaries.

use tracing_subscriber::{ EnvFilter, fmt, prelude::* };

/// Install a global `tracing` subscriber writing to stderr, filtered by
/// `RUST_LOG` and falling back to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
