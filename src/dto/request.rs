use serde::Serialize;

use crate::model::{BirthDateStatus, ImageType, Profile, ProfileImageStatus};

/// Тело `PATCH /api/v1/members/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub nickname: String,
    pub birth_date: Option<String>,
    #[serde(rename = "profileImage")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceVerifiedAreaRequest {
    pub previous_verified_area_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyAreaRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPresignedUrlRequest {
    pub image_type: ImageType,
    pub original_file_name: String,
}

impl From<&Profile> for UpdateProfileRequest {
    fn from(profile: &Profile) -> Self {
        let birth_date = match profile.birth_date {
            BirthDateStatus::Specified(date) => Some(date.format("%Y.%m.%d").to_string()),
            BirthDateStatus::NotSpecified => None,
        };
        let image = match &profile.image {
            ProfileImageStatus::Custom(url) => Some(url.clone()),
            ProfileImageStatus::Default => None,
        };

        Self {
            nickname: profile.nickname.clone(),
            birth_date,
            image,
        }
    }
}
