use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

/// Initialises the global tracing subscriber from configuration.
///
/// `RUST_LOG` overrides the configured log level. Safe to call more than
/// once; subsequent calls are no-ops (tests share one process).
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let cfg = AppConfig::new("sqlite::memory:", "test");
        init_tracing(&cfg);
        init_tracing(&cfg);
    }
}
