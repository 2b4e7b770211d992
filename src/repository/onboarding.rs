use std::sync::Arc;

use acon_error::{AconResult, VerifyAreaError};
use tracing::info;

use super::run_catching_with;
use crate::{
    dto::VerifyAreaRequest,
    local::OnboardingStore,
    model::OnboardingPreferences,
    remote::OnboardingRemoteDataSource,
    stream::DataStream,
};

/// Шаги онбординга и первичное подтверждение района.
#[derive(Clone)]
pub struct OnboardingRepository {
    remote: Arc<dyn OnboardingRemoteDataSource>,
    store: Arc<OnboardingStore>,
    areas: Arc<dyn DataStream>,
}

impl OnboardingRepository {
    pub fn new(
        remote: Arc<dyn OnboardingRemoteDataSource>,
        store: Arc<OnboardingStore>,
        areas: Arc<dyn DataStream>,
    ) -> Self {
        Self {
            remote,
            store,
            areas,
        }
    }

    /// Подтверждает район по координатам.
    ///
    /// После успеха на сервере шаг подтверждения отключается, а читатели
    /// списка районов получают сигнал. Сигнал выпускается даже если не
    /// удалось сохранить локальный флаг: данные на сервере уже изменились.
    pub async fn verify_area(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AconResult<()> {
        let request = VerifyAreaRequest {
            latitude,
            longitude,
        };
        run_catching_with::<VerifyAreaError, _>(
            "verify_area",
            self.remote.verify_area(&request).await,
        )?;

        let stored = self.store.set_should_verify_area(false).await;
        self.areas.notify_data_changed();
        info!(latitude, longitude, "Area verified");
        stored.map(drop)
    }

    pub async fn update_should_show_introduce(
        &self,
        should_show: bool,
    ) -> AconResult<()> {
        self.store
            .set_should_show_introduce(should_show)
            .await
            .map(drop)
    }

    pub async fn update_should_choose_dislikes(
        &self,
        should_choose: bool,
    ) -> AconResult<()> {
        self.store
            .set_should_choose_dislikes(should_choose)
            .await
            .map(drop)
    }

    pub async fn update_should_verify_area(
        &self,
        should_verify: bool,
    ) -> AconResult<()> {
        self.store
            .set_should_verify_area(should_verify)
            .await
            .map(drop)
    }

    pub async fn onboarding_preferences(&self) -> OnboardingPreferences {
        self.store.preferences().await
    }
}
