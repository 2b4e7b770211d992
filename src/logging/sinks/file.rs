use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling::daily};
use tracing_subscriber::{fmt, registry::LookupSpan, Layer};

use crate::logging::config::LoggingConfig;

/// Файловый слой с ежедневной ротацией.
///
/// Запись неблокирующая; guard должен жить до конца работы процесса.
pub fn layer_with_config<S>(config: &LoggingConfig) -> (Box<dyn Layer<S> + Send + Sync>, WorkerGuard)
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let appender = daily(&config.log_dir, &config.file_prefix);
    let (writer, guard) = non_blocking(appender);

    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .boxed();

    (layer, guard)
}
