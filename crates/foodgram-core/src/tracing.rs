use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize structured stdout tracing. Call once at service startup.
/// Uses JSON format with env-filter (`RUST_LOG`), falling back to
/// `default_directive` when the variable is unset.
///
/// Later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(fmt::layer().json())
        .try_init();
}

/// Human-readable variant for operator CLIs.
pub fn init_cli_tracing(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}
