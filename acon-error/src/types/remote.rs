use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибка обращения к удалённому API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("server responded with {status} (code {code:?}): {message}")]
    Server {
        status: u16,
        code: Option<i32>,
        message: String,
    },

    /// Запрос не дошёл до сервера или ответ не был получен.
    #[error("transport failure: {reason}")]
    Transport { reason: String, timed_out: bool },

    /// Тело запроса не удалось закодировать.
    #[error("failed to encode request: {reason}")]
    Encode { reason: String },

    /// Тело ответа не удалось декодировать.
    #[error("failed to decode response: {reason}")]
    Decode { reason: String },
}

impl RemoteError {
    pub fn server(
        status: u16,
        code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::Server {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn transport(
        reason: impl Into<String>,
        timed_out: bool,
    ) -> Self {
        Self::Transport {
            reason: reason.into(),
            timed_out,
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }

    /// Код ошибки из тела ответа, если сервер его прислал.
    pub fn server_code(&self) -> Option<i32> {
        match self {
            Self::Server { code, .. } => *code,
            _ => None,
        }
    }

    /// HTTP-статус ответа.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorExt for RemoteError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Server { status, .. } => StatusCode::from_http_status(*status),
            Self::Transport {
                timed_out: true, ..
            } => StatusCode::Timeout,
            Self::Transport { .. } => StatusCode::ConnectionFailed,
            Self::Encode { .. } => StatusCode::EncodingError,
            Self::Decode { .. } => StatusCode::DecodingError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::Server { .. } => "The server could not complete the request".to_string(),
            Self::Transport {
                timed_out: true, ..
            } => "The request timed out".to_string(),
            Self::Transport { .. } => "Check your network connection".to_string(),
            Self::Encode { .. } | Self::Decode { .. } => "Unexpected server response".to_string(),
        }
    }
}
