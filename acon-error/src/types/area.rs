use std::{any::Any, fmt};

use crate::{ErrorExt, ServerErrorCode, StatusCode};

/// Ошибка удаления подтверждённого района.
///
/// Сервер не присылает отдельных кодов для этих операций, поэтому
/// классификация идёт по HTTP-статусу.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteVerifiedAreaError {
    /// Район не найден (404)
    VerifiedAreaNotFound,
    /// Район принадлежит другому пользователю (403)
    NotOwner,
}

/// Ошибка замены подтверждённого района.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceVerifiedAreaError {
    /// Заменяемый район не найден (404)
    VerifiedAreaNotFound,
    /// Координаты не попадают ни в один поддерживаемый район (400)
    UnsupportedLocation,
}

/// Ошибка подтверждения района по координатам.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyAreaError {
    /// Координаты не попадают ни в один поддерживаемый район (400)
    UnsupportedLocation,
    /// Район уже подтверждён (409)
    AlreadyVerified,
}

impl fmt::Display for DeleteVerifiedAreaError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::VerifiedAreaNotFound => write!(f, "Verified area not found"),
            Self::NotOwner => write!(f, "Verified area belongs to another member"),
        }
    }
}

impl fmt::Display for ReplaceVerifiedAreaError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::VerifiedAreaNotFound => write!(f, "Verified area to replace not found"),
            Self::UnsupportedLocation => write!(f, "Location is outside supported areas"),
        }
    }
}

impl fmt::Display for VerifyAreaError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::UnsupportedLocation => write!(f, "Location is outside supported areas"),
            Self::AlreadyVerified => write!(f, "Area is already verified"),
        }
    }
}

impl std::error::Error for DeleteVerifiedAreaError {}
impl std::error::Error for ReplaceVerifiedAreaError {}
impl std::error::Error for VerifyAreaError {}

impl ErrorExt for DeleteVerifiedAreaError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::VerifiedAreaNotFound => StatusCode::NotFound,
            Self::NotOwner => StatusCode::PermissionDenied,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for ReplaceVerifiedAreaError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::VerifiedAreaNotFound => StatusCode::NotFound,
            Self::UnsupportedLocation => StatusCode::OutOfRange,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for VerifyAreaError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedLocation => StatusCode::OutOfRange,
            Self::AlreadyVerified => StatusCode::AlreadyExists,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ServerErrorCode for DeleteVerifiedAreaError {
    fn from_http_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Self::VerifiedAreaNotFound),
            403 => Some(Self::NotOwner),
            _ => None,
        }
    }
}

impl ServerErrorCode for ReplaceVerifiedAreaError {
    fn from_http_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Self::VerifiedAreaNotFound),
            400 => Some(Self::UnsupportedLocation),
            _ => None,
        }
    }
}

impl ServerErrorCode for VerifyAreaError {
    fn from_http_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::UnsupportedLocation),
            409 => Some(Self::AlreadyVerified),
            _ => None,
        }
    }
}
