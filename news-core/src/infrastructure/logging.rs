use tracing_subscriber::{EnvFilter, fmt};

/// Installs the JSON subscriber on stderr. `RUST_LOG` wins over
/// `default_filter`; later calls are no-ops.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .json()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
