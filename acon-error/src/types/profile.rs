use std::{any::Any, fmt};

use crate::{ErrorExt, ServerErrorCode, StatusCode};

/// Ошибка сохранения профиля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateProfileError {
    /// Никнейм уже занят (40901)
    AlreadyExistNickname,
    /// Никнейм не соответствует формату (40051)
    InvalidNicknameFormat,
    /// Путь к изображению в бакете невалиден (40052)
    InvalidBucketImagePath,
    /// Дата рождения не соответствует формату (40053)
    InvalidBirthDateFormat,
    /// Неподдерживаемый тип изображения (40045)
    InvalidImageType,
    /// Внутренняя ошибка сервера (50005)
    InternalServerError,
}

/// Ошибка проверки никнейма.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateNicknameError {
    /// Пустой ввод (локальная проверка)
    EmptyInput,
    /// Превышена максимальная длина (локальная проверка)
    InputLengthExceeded { max: usize },
    /// Недопустимые символы (40051)
    InvalidFormat,
    /// Никнейм уже занят (40901)
    AlreadyExist,
}

/// Ошибка проверки даты рождения. Проверка полностью локальная.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateBirthDateError {
    /// Дата позже сегодняшнего дня
    InputIsFuture,
    /// Дата раньше 1900-01-01
    InputIsTooPast,
    /// Ввод не является датой
    InvalidFormat,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl UpdateProfileError {
    /// Код ошибки на стороне сервера.
    pub const fn code(&self) -> i32 {
        match self {
            Self::AlreadyExistNickname => 40901,
            Self::InvalidNicknameFormat => 40051,
            Self::InvalidBucketImagePath => 40052,
            Self::InvalidBirthDateFormat => 40053,
            Self::InvalidImageType => 40045,
            Self::InternalServerError => 50005,
        }
    }
}

impl ValidateNicknameError {
    /// Код ошибки на стороне сервера; `None` для локальных проверок.
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::InvalidFormat => Some(40051),
            Self::AlreadyExist => Some(40901),
            Self::EmptyInput | Self::InputLengthExceeded { .. } => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for UpdateProfileError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::AlreadyExistNickname => write!(f, "Nickname already exists"),
            Self::InvalidNicknameFormat => write!(f, "Nickname has an invalid format"),
            Self::InvalidBucketImagePath => write!(f, "Uploaded image path is invalid"),
            Self::InvalidBirthDateFormat => write!(f, "Birth date has an invalid format"),
            Self::InvalidImageType => write!(f, "Image type is not supported"),
            Self::InternalServerError => write!(f, "Server failed to update the profile"),
        }
    }
}

impl fmt::Display for ValidateNicknameError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Nickname is empty"),
            Self::InputLengthExceeded { max } => {
                write!(f, "Nickname is longer than {max} characters")
            }
            Self::InvalidFormat => write!(f, "Nickname has an invalid format"),
            Self::AlreadyExist => write!(f, "Nickname already exists"),
        }
    }
}

impl fmt::Display for ValidateBirthDateError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::InputIsFuture => write!(f, "Birth date is in the future"),
            Self::InputIsTooPast => write!(f, "Birth date is before 1900-01-01"),
            Self::InvalidFormat => write!(f, "Birth date has an invalid format"),
        }
    }
}

impl std::error::Error for UpdateProfileError {}
impl std::error::Error for ValidateNicknameError {}
impl std::error::Error for ValidateBirthDateError {}

impl ErrorExt for UpdateProfileError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExistNickname => StatusCode::AlreadyExists,
            Self::InvalidNicknameFormat | Self::InvalidBirthDateFormat => StatusCode::InvalidFormat,
            Self::InvalidBucketImagePath | Self::InvalidImageType => StatusCode::InvalidValue,
            Self::InternalServerError => StatusCode::ServerError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for ValidateNicknameError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput => StatusCode::EmptyInput,
            Self::InputLengthExceeded { .. } => StatusCode::InputTooLong,
            Self::InvalidFormat => StatusCode::InvalidFormat,
            Self::AlreadyExist => StatusCode::AlreadyExists,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for ValidateBirthDateError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InputIsFuture | Self::InputIsTooPast => StatusCode::OutOfRange,
            Self::InvalidFormat => StatusCode::InvalidFormat,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ServerErrorCode for UpdateProfileError {
    fn from_server_code(code: i32) -> Option<Self> {
        match code {
            40901 => Some(Self::AlreadyExistNickname),
            40051 => Some(Self::InvalidNicknameFormat),
            40052 => Some(Self::InvalidBucketImagePath),
            40053 => Some(Self::InvalidBirthDateFormat),
            40045 => Some(Self::InvalidImageType),
            50005 => Some(Self::InternalServerError),
            _ => None,
        }
    }
}

impl ServerErrorCode for ValidateNicknameError {
    fn from_server_code(code: i32) -> Option<Self> {
        match code {
            40051 => Some(Self::InvalidFormat),
            40901 => Some(Self::AlreadyExist),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
