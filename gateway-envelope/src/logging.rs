use tracing_subscriber::EnvFilter;

/// Initializes the tracing from RUST_LOG env var if present or sets minimal logging:
/// - INFO for the running lambda and this crate
/// - ERROR for everything else
///
/// No colours or timestamps because CloudWatch adds its own.
pub fn init_tracing() {
    // tracing uses target names with underscores, e.g. `log_etl`
    let binary_name = std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().replace('-', "_")));

    let default_filter = match binary_name {
        Some(name) => format!("error,{name}=info,gateway_envelope=info"),
        None => "info".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .compact()
        .init();
}
