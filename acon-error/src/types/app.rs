use std::{any::Any, fmt};

use crate::{ErrorExt, ServerErrorCode, StatusCode};

/// Ошибка проверки обязательного обновления приложения.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchShouldUpdateError {
    /// Сервер не распознал версию или платформу (400)
    InvalidVersion,
}

impl fmt::Display for FetchShouldUpdateError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::InvalidVersion => write!(f, "App version is not recognized"),
        }
    }
}

impl std::error::Error for FetchShouldUpdateError {}

impl ErrorExt for FetchShouldUpdateError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidVersion => StatusCode::InvalidArgs,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ServerErrorCode for FetchShouldUpdateError {
    fn from_http_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::InvalidVersion),
            _ => None,
        }
    }
}
