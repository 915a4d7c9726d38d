use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Failure to install the global subscriber.
pub type InitError = Box<dyn Error + Send + Sync + 'static>;

/// Install a console subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. Fails if a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> Result<(), InitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Initialize simple console-only logging for tests
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("odxproxy=trace,debug")),
        )
        .with_test_writer()
        .try_init();
}
