use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. Call once, at the top of `main`.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from `LOG_LEVEL`) is used.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
