//! Поддельные удалённые источники для тестов репозиториев.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use acon_error::RemoteError;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    dto::{
        GetPresignedUrlRequest, PresignedUrlResponse, ProfileResponse, ReplaceVerifiedAreaRequest,
        SavedSpotResponse, ShouldUpdateResponse, UpdateProfileRequest, VerifiedAreaListResponse,
        VerifiedAreaResponse, VerifyAreaRequest,
    },
    model::VerifiedArea,
    remote::{AconAppRemoteDataSource, OnboardingRemoteDataSource, ProfileRemoteDataSource},
};

/// Сервер в памяти. Районы хранятся как есть, ошибки задаются по имени
/// операции и возвращаются, пока их не снимут.
#[derive(Default)]
pub(crate) struct FakeRemote {
    pub profile: Mutex<Option<ProfileResponse>>,
    pub saved_spots: Mutex<Vec<SavedSpotResponse>>,
    pub areas: Mutex<Vec<VerifiedArea>>,
    pub next_area_id: AtomicUsize,
    pub errors: Mutex<HashMap<&'static str, RemoteError>>,
    pub area_fetch_delay: Mutex<Option<Duration>>,
    pub calls: Mutex<HashMap<&'static str, usize>>,
    pub updated_profiles: Mutex<Vec<UpdateProfileRequest>>,
    pub presigned_requests: Mutex<Vec<GetPresignedUrlRequest>>,
    pub uploads: Mutex<Vec<(String, Vec<u8>, String)>>,
    pub should_update: Mutex<Option<bool>>,
    pub checked_versions: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn with_areas(areas: &[(i64, &str)]) -> Self {
        let fake = Self::default();
        *fake.areas.lock() = areas
            .iter()
            .map(|(id, name)| VerifiedArea::new(*id, *name))
            .collect();
        fake.next_area_id.store(100, Ordering::SeqCst);
        fake
    }

    pub fn fail(
        &self,
        operation: &'static str,
        err: RemoteError,
    ) {
        self.errors.lock().insert(operation, err);
    }

    pub fn recover(
        &self,
        operation: &'static str,
    ) {
        self.errors.lock().remove(operation);
    }

    pub fn calls(
        &self,
        operation: &'static str,
    ) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    fn enter(
        &self,
        operation: &'static str,
    ) -> Result<(), RemoteError> {
        *self.calls.lock().entry(operation).or_default() += 1;
        match self.errors.lock().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileRemoteDataSource for FakeRemote {
    async fn get_profile(&self) -> Result<ProfileResponse, RemoteError> {
        self.enter("get_profile")?;
        self.profile
            .lock()
            .clone()
            .ok_or_else(|| RemoteError::server(404, None, "no profile"))
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<(), RemoteError> {
        self.enter("update_profile")?;
        self.updated_profiles.lock().push(request.clone());
        Ok(())
    }

    async fn validate_nickname(
        &self,
        _nickname: &str,
    ) -> Result<(), RemoteError> {
        self.enter("validate_nickname")
    }

    async fn get_saved_spots(&self) -> Result<Vec<SavedSpotResponse>, RemoteError> {
        self.enter("get_saved_spots")?;
        Ok(self.saved_spots.lock().clone())
    }

    async fn get_verified_areas(&self) -> Result<VerifiedAreaListResponse, RemoteError> {
        self.enter("get_verified_areas")?;
        let delay = *self.area_fetch_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let list = self
            .areas
            .lock()
            .iter()
            .map(|a| VerifiedAreaResponse {
                verified_area_id: a.verified_area_id,
                name: a.name.clone(),
            })
            .collect();
        Ok(VerifiedAreaListResponse {
            verified_area_list: list,
        })
    }

    async fn replace_verified_area(
        &self,
        request: &ReplaceVerifiedAreaRequest,
    ) -> Result<(), RemoteError> {
        self.enter("replace_verified_area")?;
        let mut areas = self.areas.lock();
        let Some(pos) = areas
            .iter()
            .position(|a| a.verified_area_id == request.previous_verified_area_id)
        else {
            return Err(RemoteError::server(404, None, "no such area"));
        };
        let id = self.next_area_id.fetch_add(1, Ordering::SeqCst) as i64;
        areas[pos] = VerifiedArea::new(id, format!("{:.1},{:.1}", request.latitude, request.longitude));
        Ok(())
    }

    async fn delete_verified_area(
        &self,
        verified_area_id: i64,
    ) -> Result<(), RemoteError> {
        self.enter("delete_verified_area")?;
        let mut areas = self.areas.lock();
        let before = areas.len();
        areas.retain(|a| a.verified_area_id != verified_area_id);
        if areas.len() == before {
            return Err(RemoteError::server(404, None, "no such area"));
        }
        Ok(())
    }
}

#[async_trait]
impl OnboardingRemoteDataSource for FakeRemote {
    async fn verify_area(
        &self,
        request: &VerifyAreaRequest,
    ) -> Result<(), RemoteError> {
        self.enter("verify_area")?;
        let id = self.next_area_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.areas.lock().push(VerifiedArea::new(
            id,
            format!("{:.1},{:.1}", request.latitude, request.longitude),
        ));
        Ok(())
    }
}

#[async_trait]
impl AconAppRemoteDataSource for FakeRemote {
    async fn fetch_should_update_app(
        &self,
        current_version: &str,
    ) -> Result<ShouldUpdateResponse, RemoteError> {
        self.enter("fetch_should_update_app")?;
        self.checked_versions.lock().push(current_version.to_owned());
        Ok(ShouldUpdateResponse {
            should_update: *self.should_update.lock(),
        })
    }

    async fn get_presigned_url(
        &self,
        request: &GetPresignedUrlRequest,
    ) -> Result<PresignedUrlResponse, RemoteError> {
        self.enter("get_presigned_url")?;
        self.presigned_requests.lock().push(request.clone());
        Ok(PresignedUrlResponse {
            file_url: format!("https://cdn.test/{}", request.original_file_name),
            presigned_url: format!("https://bucket.test/put/{}", request.original_file_name),
        })
    }

    async fn upload_file(
        &self,
        presigned_url: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<(), RemoteError> {
        self.enter("upload_file")?;
        self.uploads
            .lock()
            .push((presigned_url.to_owned(), bytes, mime.to_owned()));
        Ok(())
    }
}
