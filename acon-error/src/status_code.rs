use std::fmt;

use num_enum::TryFromPrimitive;
#[cfg(feature = "serde_repr")]
use serde_repr::{Deserialize_repr, Serialize_repr};
#[cfg(feature = "strum")]
use strum_macros::{AsRefStr, EnumIter};

/// Коды статуса для категоризации ошибок клиента.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки данных и валидации ввода
/// - 3xxx: Авторизация / сессия
/// - 4xxx: Ограничения по частоте (rate limiting)
/// - 5xxx: Ошибки на стороне сервера
/// - 6xxx: Сеть / IO
/// - 8xxx: Кодирование / декодирование ответов
///
/// Коды не совпадают с кодами ошибок сервера (`40901`, `40051`, ...): те
/// разбираются в типизированные доменные ошибки, а `StatusCode` описывает
/// лишь их категорию.
#[cfg_attr(feature = "strum", derive(AsRefStr, EnumIter))]
#[cfg_attr(feature = "serde_repr", derive(Serialize_repr, Deserialize_repr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Unsupported = 1001,
    Unexpected = 1002,
    Internal = 1003,
    InvalidArgs = 1004,
    NotImplemented = 1005,

    // === 2xxx: Ошибки данных ===
    NotFound = 2000,
    AlreadyExists = 2001,
    InvalidValue = 2004,
    InvalidData = 2009,
    InvalidFormat = 2010,
    OutOfRange = 2011,
    InputTooLong = 2012,
    EmptyInput = 2013,

    // === 3xxx: Авторизация/Сессия ===
    AuthFailed = 3000,
    PermissionDenied = 3001,
    SessionExpired = 3002,
    InvalidToken = 3003,
    Unauthorized = 3009,

    // === 4xxx: Ограничение скорости ===
    RateLimited = 4000,

    // === 5xxx: Сервер ===
    ServerError = 5000,
    ServiceUnavailable = 5001,

    // === 6xxx: Сеть/IO ===
    Io = 6000,
    ConnectionClosed = 6001,
    Timeout = 6002,
    ConnectionFailed = 6004,
    UnexpectedEof = 6007,

    // === 8xxx: Кодирование ===
    InvalidUtf8 = 8004,
    EncodingError = 8010,
    DecodingError = 8011,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Категория по HTTP-статусу ответа сервера.
    ///
    /// Используется, когда тело ответа не содержит распознанного кода ошибки.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400 | 422 => Self::InvalidArgs,
            401 => Self::Unauthorized,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 => Self::Timeout,
            409 => Self::AlreadyExists,
            429 => Self::RateLimited,
            501 => Self::NotImplemented,
            502..=504 => Self::ServiceUnavailable,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Возвращает `true`, если операцию с этим кодом имеет смысл повторить.
    ///
    /// UI показывает для таких ошибок кнопку «повторить».
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::ConnectionFailed
                | Self::ConnectionClosed
                | Self::ServiceUnavailable
                | Self::RateLimited
        )
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Ошибка в запросе или во вводе пользователя (диапазоны `2xxx..4xxx`
    /// плюс `InvalidArgs`).
    pub fn is_client_error(&self) -> bool {
        let c = self.code();
        if (2000..=4999).contains(&c) {
            return true;
        }
        matches!(self, Self::InvalidArgs)
    }

    /// Внутренняя ошибка, ошибка сервера или инфраструктуры.
    pub fn is_server_error(&self) -> bool {
        let c = self.code();
        !matches!(self, Self::InvalidArgs) && matches!(c, 1000..=1999 | 5000..=6999)
    }

    /// Требуется ли логировать как критическую ошибку.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Internal | Self::Unexpected)
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::NotFound | Self::AlreadyExists => LogLevel::Debug,
            Self::InvalidArgs
            | Self::InvalidValue
            | Self::InvalidData
            | Self::InvalidFormat
            | Self::OutOfRange
            | Self::InputTooLong
            | Self::EmptyInput
            | Self::AuthFailed
            | Self::PermissionDenied
            | Self::Unauthorized => LogLevel::Info,
            Self::RateLimited | Self::Timeout | Self::ConnectionClosed => LogLevel::Warn,
            Self::Internal | Self::Unexpected | Self::ServerError => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        #[cfg(feature = "strum")]
        {
            write!(f, "{} ({})", self.as_ref(), self.code())
        }
        #[cfg(not(feature = "strum"))]
        {
            write!(f, "{:?} ({})", self, self.code())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
