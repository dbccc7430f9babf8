//! Log output for the binaries.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Stdout carries program output, so logs never go there.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
