use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{
    BirthDateStatus, Profile, ProfileImageStatus, SavedSpot, SpotThumbnailStatus, VerifiedArea,
};

/// Ответ `GET /api/v1/members/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub nickname: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, rename = "profileImage")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSpotResponse {
    pub spot_id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSpotsResponse {
    pub saved_spot_list: Vec<SavedSpotResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAreaResponse {
    pub verified_area_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAreaListResponse {
    pub verified_area_list: Vec<VerifiedAreaResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    pub file_url: String,
    #[serde(rename = "preSignedUrl")]
    pub presigned_url: String,
}

/// Ответ `GET /api/v1/app-updates`. Отсутствующий флаг означает, что
/// обновление не требуется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShouldUpdateResponse {
    #[serde(default)]
    pub should_update: Option<bool>,
}

/// Ответ сервера на вход через внешнего провайдера.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[serde(rename = "externalUUID")]
    pub external_uuid: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub has_verified_area: bool,
    pub has_preference: bool,
}

/// Тело неуспешного ответа API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Преобразование в доменные объекты
////////////////////////////////////////////////////////////////////////////////

impl ProfileResponse {
    pub fn into_profile(self) -> Profile {
        let birth_date = self
            .birth_date
            .as_deref()
            .and_then(parse_dotted_date)
            .map_or(BirthDateStatus::NotSpecified, BirthDateStatus::Specified);
        let image = self
            .image
            .map_or(ProfileImageStatus::Default, ProfileImageStatus::Custom);

        Profile {
            nickname: self.nickname,
            birth_date,
            image,
        }
    }
}

impl SavedSpotResponse {
    pub fn into_saved_spot(self) -> SavedSpot {
        let thumbnail = match self.image {
            Some(url) if !url.trim().is_empty() => SpotThumbnailStatus::Exist(url),
            _ => SpotThumbnailStatus::Empty,
        };

        SavedSpot {
            spot_id: self.spot_id,
            name: self.name,
            thumbnail,
        }
    }
}

impl VerifiedAreaResponse {
    pub fn into_verified_area(self) -> VerifiedArea {
        VerifiedArea {
            verified_area_id: self.verified_area_id,
            name: self.name,
        }
    }
}

impl VerifiedAreaListResponse {
    pub fn into_verified_areas(self) -> Vec<VerifiedArea> {
        self.verified_area_list
            .into_iter()
            .map(VerifiedAreaResponse::into_verified_area)
            .collect()
    }
}

/// Разбирает дату вида `yyyy.MM.dd`. Ведущие нули необязательны.
pub(crate) fn parse_dotted_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('.');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
