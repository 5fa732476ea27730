//! Shared helpers for integration tests.

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber. Set `RUST_LOG=tapcount=trace` to see
/// the resolution trace.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
