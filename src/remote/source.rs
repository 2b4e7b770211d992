use acon_error::RemoteError;
use async_trait::async_trait;

use crate::dto::{
    GetPresignedUrlRequest, PresignedUrlResponse, ProfileResponse, ReplaceVerifiedAreaRequest,
    SavedSpotResponse, ShouldUpdateResponse, UpdateProfileRequest, VerifiedAreaListResponse,
    VerifyAreaRequest,
};

/// Операции API с профилем и подтверждёнными районами.
#[async_trait]
pub trait ProfileRemoteDataSource: Send + Sync {
    async fn get_profile(&self) -> Result<ProfileResponse, RemoteError>;

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<(), RemoteError>;

    /// Успех означает, что никнейм свободен и допустим.
    async fn validate_nickname(
        &self,
        nickname: &str,
    ) -> Result<(), RemoteError>;

    async fn get_saved_spots(&self) -> Result<Vec<SavedSpotResponse>, RemoteError>;

    async fn get_verified_areas(&self) -> Result<VerifiedAreaListResponse, RemoteError>;

    async fn replace_verified_area(
        &self,
        request: &ReplaceVerifiedAreaRequest,
    ) -> Result<(), RemoteError>;

    async fn delete_verified_area(
        &self,
        verified_area_id: i64,
    ) -> Result<(), RemoteError>;
}

#[async_trait]
pub trait OnboardingRemoteDataSource: Send + Sync {
    async fn verify_area(
        &self,
        request: &VerifyAreaRequest,
    ) -> Result<(), RemoteError>;
}

/// Общие операции приложения: проверка обновления и загрузка изображений.
#[async_trait]
pub trait AconAppRemoteDataSource: Send + Sync {
    /// Запрос без авторизации.
    async fn fetch_should_update_app(
        &self,
        current_version: &str,
    ) -> Result<ShouldUpdateResponse, RemoteError>;

    async fn get_presigned_url(
        &self,
        request: &GetPresignedUrlRequest,
    ) -> Result<PresignedUrlResponse, RemoteError>;

    async fn upload_file(
        &self,
        presigned_url: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<(), RemoteError>;
}
