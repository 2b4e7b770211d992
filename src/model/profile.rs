use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Профиль текущего пользователя.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub nickname: String,
    pub birth_date: BirthDateStatus,
    pub image: ProfileImageStatus,
}

/// Указана ли дата рождения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BirthDateStatus {
    Specified(NaiveDate),
    #[default]
    NotSpecified,
}

/// Изображение профиля: стандартное или загруженное пользователем.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileImageStatus {
    #[default]
    Default,
    Custom(String),
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Profile {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            birth_date: BirthDateStatus::NotSpecified,
            image: ProfileImageStatus::Default,
        }
    }

    pub fn with_birth_date(
        mut self,
        date: NaiveDate,
    ) -> Self {
        self.birth_date = BirthDateStatus::Specified(date);
        self
    }

    pub fn with_image(
        mut self,
        url: impl Into<String>,
    ) -> Self {
        self.image = ProfileImageStatus::Custom(url.into());
        self
    }
}

impl BirthDateStatus {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Specified(date) => Some(*date),
            Self::NotSpecified => None,
        }
    }
}

impl ProfileImageStatus {
    /// URL изображения, если оно не стандартное.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Custom(url) => Some(url),
        }
    }

    /// Путь к локальному файлу, который ещё нужно загрузить на сервер.
    ///
    /// `file://`-ссылка считается локальной всегда, голый путь только если
    /// файл существует. Адреса `http(s)://` уже загружены.
    pub fn local_path(&self) -> Option<PathBuf> {
        let url = self.url()?;
        if let Some(path) = url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return None;
        }
        let path = PathBuf::from(url);
        path.exists().then_some(path)
    }
}
