//! Репозитории: единая точка доступа к данным для верхних слоёв.
//!
//! Ошибки на границе репозитория всегда `StackError`. Если сервер вернул
//! известный для операции код, корневая ошибка имеет доменный тип операции
//! (например, [`UpdateProfileError`](acon_error::UpdateProfileError)),
//! иначе остаётся [`RemoteError`].

mod app;
mod onboarding;
mod profile;

#[cfg(test)]
pub(crate) mod testing;

use acon_error::{classify, AconResult, LogLevel, RemoteError, ServerErrorCode, StackError};
use tracing::{debug, error, info, trace, warn};

pub use app::{image_mime_type, AconAppRepository};
pub use onboarding::OnboardingRepository;
pub use profile::ProfileRepository;

/// Классифицирует ошибку удалённого вызова доменной ошибкой `E`.
pub(crate) fn run_catching_with<E: ServerErrorCode, T>(
    operation: &'static str,
    result: Result<T, RemoteError>,
) -> AconResult<T> {
    result.map_err(|err| failed(operation, classify::<E>(err)))
}

/// Ошибка удалённого вызова без доменной классификации.
pub(crate) fn run_catching<T>(
    operation: &'static str,
    result: Result<T, RemoteError>,
) -> AconResult<T> {
    result.map_err(|err| failed(operation, StackError::new(err)))
}

/// Повторно классифицирует уже обёрнутую ошибку. Нужна, когда операция
/// вызывает другой репозиторий, который классификацию не проводит.
pub(crate) fn reclassify<E: ServerErrorCode>(err: StackError) -> StackError {
    match err.downcast_ref::<RemoteError>() {
        Some(remote) => classify::<E>(remote.clone()),
        None => err,
    }
}

fn failed(
    operation: &'static str,
    err: StackError,
) -> StackError {
    let err = err.context(operation);
    log_failure(operation, &err);
    err
}

pub(crate) fn log_failure(
    operation: &'static str,
    err: &StackError,
) {
    let code = err.status_code().code();
    match err.log_level() {
        LogLevel::Trace => trace!(operation, code, error = %err, "Operation failed"),
        LogLevel::Debug => debug!(operation, code, error = %err, "Operation failed"),
        LogLevel::Info => info!(operation, code, error = %err, "Operation failed"),
        LogLevel::Warn => warn!(operation, code, error = %err, "Operation failed"),
        LogLevel::Error => error!(operation, code, error = %err, "Operation failed"),
    }
}
