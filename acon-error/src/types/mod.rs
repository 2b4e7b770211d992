pub mod app;
pub mod area;
pub mod profile;
pub mod remote;

// Публичный экспорт всех типов ошибок и функций из вложенных
// модулей, чтобы упростить доступ к ним из внешнего кода.
pub use app::*;
pub use area::*;
pub use profile::*;
pub use remote::*;

use crate::{ErrorExt, StackError, StatusCode};

/// Универсальная ошибка с кодом и сообщением.
#[derive(Debug, Clone)]
pub struct GenericError {
    code: StatusCode,
    message: String,
}

impl GenericError {
    pub fn new(
        code: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenericError {}

impl ErrorExt for GenericError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Доменная ошибка операции, которую можно восстановить из ответа сервера.
///
/// Сервер сообщает о бизнес-ошибках числовым кодом в теле ответа (`40901`,
/// `40051`, ...). Каждая операция репозитория знает свой набор кодов; всё,
/// что не распознано, остаётся [`RemoteError`].
pub trait ServerErrorCode: ErrorExt + Sized {
    /// Разбирает код ошибки из тела ответа.
    fn from_server_code(_code: i32) -> Option<Self> {
        None
    }

    /// Разбирает HTTP-статус, если код в теле отсутствует или неизвестен.
    fn from_http_status(_status: u16) -> Option<Self> {
        None
    }
}

/// Превращает ошибку удалённого вызова в `StackError`, классифицируя её
/// доменной ошибкой `E`, если сервер вернул известный для операции код.
pub fn classify<E: ServerErrorCode>(err: RemoteError) -> StackError {
    let typed = err
        .server_code()
        .and_then(E::from_server_code)
        .or_else(|| err.http_status().and_then(E::from_http_status));

    match typed {
        Some(domain) => StackError::new(domain),
        None => StackError::new(err),
    }
}

/// Конвертация из std::io::Error
impl From<std::io::Error> for StackError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => StatusCode::NotFound,
            std::io::ErrorKind::PermissionDenied => StatusCode::PermissionDenied,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => StatusCode::ConnectionFailed,
            std::io::ErrorKind::TimedOut => StatusCode::Timeout,
            std::io::ErrorKind::UnexpectedEof => StatusCode::UnexpectedEof,
            _ => StatusCode::Io,
        };

        StackError::new(GenericError::new(code, err.to_string()))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
