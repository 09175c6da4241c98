//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` when set, otherwise from `default_directive`
/// (for example `"info"` or `"runtime=debug"`). Calling it twice is harmless:
/// the second call returns `false` and leaves the first subscriber in place.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
