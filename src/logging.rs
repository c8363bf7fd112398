use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PROMANO_LOG";

/// Installs the fmt subscriber. Filter directives come from `PROMANO_LOG`, `info` otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
