use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, filtered by `RUST_LOG` when set.
/// Logs go to stderr since stdout carries the rendered view. Repeated calls
/// are no-ops.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("postgraph=info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
