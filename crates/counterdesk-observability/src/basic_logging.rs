use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging for the counterdesk binary.
///
/// # Configuration
///
/// - **Log Level**: `RUST_LOG` if set, otherwise `LOG_LEVEL` (default: "info")
///   applied to the counterdesk crates
/// - **Format**: `LOG_FORMAT=json` for JSON lines, compact text otherwise
/// - **Filtering**: HTTP client internals held at warn
///
/// Output goes to stderr so command output on stdout stays clean. Calling
/// this twice is harmless; the second subscriber is not installed.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let compact_layer = (!json).then(|| {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(compact_layer)
        .try_init();
}

fn default_directives(log_level: &str) -> String {
    format!(
        "counterdesk={level},counterdesk_auth={level},counterdesk_core={level},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn",
        level = log_level
    )
}
