use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use tracing_appender::non_blocking::WorkerGuard;

/// Handle для управления жизненным циклом логирования.
///
/// Держит guard неблокирующего файлового писателя: пока handle жив, события
/// сбрасываются в файл в фоне.
pub struct LoggingHandle {
    file_guard: Option<WorkerGuard>,
    shutdown_started: Arc<AtomicBool>,
    flush_timeout: Duration,
}

impl LoggingHandle {
    pub fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            file_guard,
            shutdown_started: Arc::new(AtomicBool::new(false)),
            flush_timeout: Duration::from_secs(5),
        }
    }

    /// Устанавливает таймаут, после которого медленный shutdown попадает в
    /// stderr.
    pub fn with_flush_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.flush_timeout = timeout;
        self
    }

    pub fn has_file_sink(&self) -> bool {
        self.file_guard.is_some()
    }

    pub fn is_shutdown_in_progress(&self) -> bool {
        self.shutdown_started.load(Ordering::Acquire)
    }

    /// Graceful shutdown: дожидается записи буферизованных событий.
    pub fn shutdown(mut self) {
        self.shutdown_started.store(true, Ordering::Release);
        tracing::debug!("Initiating logging shutdown");

        let start = Instant::now();
        drop(self.file_guard.take());
        let elapsed = start.elapsed();

        if elapsed > self.flush_timeout {
            eprintln!(
                "WARNING: Logging shutdown took {}ms (timeout: {}ms)",
                elapsed.as_millis(),
                self.flush_timeout.as_millis()
            );
        }
    }
}

impl Drop for LoggingHandle {
    fn drop(&mut self) {
        if self.file_guard.is_some() && !self.is_shutdown_in_progress() {
            eprintln!(
                "WARNING: LoggingHandle dropped without explicit shutdown(). \
                 Some logs may be lost."
            );
        }
    }
}
