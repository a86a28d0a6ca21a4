//! Logging setup (tracing + tracing-subscriber)

use tracing_subscriber::EnvFilter;

/// Default filter, or `debug` for this crate when `verbose` is set.
/// `RUST_LOG` always wins.
fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bom_epd=debug")
        } else {
            EnvFilter::new("bom_epd=info")
        }
    })
}

/// Initialize logging to stderr, keeping stdout for command output
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Logging for tests; safe to call more than once
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
