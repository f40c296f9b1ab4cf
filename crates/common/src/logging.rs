//! Logging and tracing initialization.
//!
//! The engine logs from two execution contexts — the sensor task and
//! the frame task — so the default formatter keeps thread ids on to
//! make interleaved session logs readable. Hosts embedding the engine
//! call `init_logging` once at startup; repeated calls are harmless
//! (the first subscriber wins).

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with the stabilizer's default filter (useful for
/// tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}
