use tracing_subscriber::EnvFilter;

use super::config::{LoggingConfig, LOG_ENV};

/// Фильтр событий: `ACON_LOG`, затем `RUST_LOG`, затем настройки.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directive = config.build_filter_directive();
    match EnvFilter::try_new(&directive) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Invalid log filter directive from config ('{directive}'): {e}; falling back to 'info'");
            EnvFilter::new("info")
        }
    }
}
