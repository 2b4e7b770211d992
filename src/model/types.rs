use std::fmt;

use serde::{Deserialize, Serialize};

/// Назначение загружаемого изображения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    Profile,
    Review,
    Spot,
}

/// Состояние входа в приложение.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignInStatus {
    #[default]
    Guest,
    User,
}

impl SignInStatus {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::User)
    }
}

impl fmt::Display for ImageType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::Profile => "PROFILE",
            Self::Review => "REVIEW",
            Self::Spot => "SPOT",
        };
        f.write_str(s)
    }
}
