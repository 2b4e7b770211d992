use acon_error::RemoteError;
use async_trait::async_trait;
use reqwest::Method;

use super::{AconAppRemoteDataSource, ApiClient, OnboardingRemoteDataSource, ProfileRemoteDataSource};
use crate::dto::{
    GetPresignedUrlRequest, PresignedUrlResponse, ProfileResponse, ReplaceVerifiedAreaRequest,
    SavedSpotResponse, SavedSpotsResponse, ShouldUpdateResponse, UpdateProfileRequest,
    VerifiedAreaListResponse, VerifyAreaRequest,
};

const MEMBERS_ME: &str = "/api/v1/members/me";
const NICKNAME_VALIDATE: &str = "/api/v1/nickname/validate";
const SAVED_SPOTS: &str = "/api/v1/saved-spots";
const VERIFIED_AREAS: &str = "/api/v1/verified-areas";
const VERIFIED_AREAS_REPLACEMENT: &str = "/api/v1/verified-areas/replacement";
const PRESIGNED_URL: &str = "/api/v1/images/presigned-url";
const APP_UPDATES: &str = "/api/v1/app-updates";

const PLATFORM: &str = "android";

/// Реализация удалённых источников данных поверх [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    api: ApiClient,
}

impl HttpDataSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileRemoteDataSource for HttpDataSource {
    async fn get_profile(&self) -> Result<ProfileResponse, RemoteError> {
        self.api.get_json(MEMBERS_ME).await
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<(), RemoteError> {
        self.api
            .execute(self.api.request(Method::PATCH, MEMBERS_ME).json(request))
            .await
    }

    async fn validate_nickname(
        &self,
        nickname: &str,
    ) -> Result<(), RemoteError> {
        let builder = self
            .api
            .request(Method::GET, NICKNAME_VALIDATE)
            .query(&[("nickname", nickname)]);
        self.api.execute(builder).await
    }

    async fn get_saved_spots(&self) -> Result<Vec<SavedSpotResponse>, RemoteError> {
        let response: SavedSpotsResponse = self.api.get_json(SAVED_SPOTS).await?;
        Ok(response.saved_spot_list)
    }

    async fn get_verified_areas(&self) -> Result<VerifiedAreaListResponse, RemoteError> {
        self.api.get_json(VERIFIED_AREAS).await
    }

    async fn replace_verified_area(
        &self,
        request: &ReplaceVerifiedAreaRequest,
    ) -> Result<(), RemoteError> {
        self.api
            .execute(
                self.api
                    .request(Method::POST, VERIFIED_AREAS_REPLACEMENT)
                    .json(request),
            )
            .await
    }

    async fn delete_verified_area(
        &self,
        verified_area_id: i64,
    ) -> Result<(), RemoteError> {
        let path = format!("{VERIFIED_AREAS}/{verified_area_id}");
        self.api
            .execute(self.api.request(Method::DELETE, &path))
            .await
    }
}

#[async_trait]
impl OnboardingRemoteDataSource for HttpDataSource {
    async fn verify_area(
        &self,
        request: &VerifyAreaRequest,
    ) -> Result<(), RemoteError> {
        self.api
            .execute(self.api.request(Method::POST, VERIFIED_AREAS).json(request))
            .await
    }
}

#[async_trait]
impl AconAppRemoteDataSource for HttpDataSource {
    async fn fetch_should_update_app(
        &self,
        current_version: &str,
    ) -> Result<ShouldUpdateResponse, RemoteError> {
        let builder = self
            .api
            .anonymous_request(Method::GET, APP_UPDATES)
            .query(&[("version", current_version), ("platform", PLATFORM)]);
        self.api.fetch_json(builder).await
    }

    async fn get_presigned_url(
        &self,
        request: &GetPresignedUrlRequest,
    ) -> Result<PresignedUrlResponse, RemoteError> {
        self.api.send_json(Method::POST, PRESIGNED_URL, request).await
    }

    async fn upload_file(
        &self,
        presigned_url: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<(), RemoteError> {
        self.api.put_bytes(presigned_url, bytes, mime).await
    }
}
