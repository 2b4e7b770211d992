//! Логирование на `tracing`: фильтр, консольный и файловый слои.

pub mod config;
mod filters;
mod formatter;
pub mod handle;
pub mod sinks;

pub use config::{LogFormat, LoggingConfig, LOG_ENV};
pub use handle::LoggingHandle;

use acon_error::{AconResult, GenericError, StackError, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Инициализация логирования с конфигурацией.
///
/// Возвращённый handle нужно держать до конца работы процесса и закрыть
/// через [`LoggingHandle::shutdown`].
pub fn init_logging(config: &LoggingConfig) -> AconResult<LoggingHandle> {
    config.validate()?;
    config.ensure_log_dir()?;

    let env_filter = filters::build_filter_from_config(config);
    let mut layers = Vec::new();

    if config.console_enabled {
        layers.push(sinks::console::layer_with_config(config));
    }

    let file_guard = if config.file_enabled {
        let (file_layer, guard) = sinks::file::layer_with_config(config);
        layers.push(file_layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers.with_filter(env_filter))
        .try_init()
        .map_err(|e| {
            StackError::new(GenericError::new(
                StatusCode::Internal,
                format!("failed to install tracing subscriber: {e}"),
            ))
        })?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = %config.format,
        console_enabled = config.console_enabled,
        file_enabled = config.file_enabled,
        "Logging system initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}
