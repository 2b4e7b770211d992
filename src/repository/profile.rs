use std::{future::Future, sync::Arc};

use acon_error::{
    AconResult, DeleteVerifiedAreaError, ReplaceVerifiedAreaError, StackError,
    UpdateProfileError, ValidateNicknameError,
};
use async_stream::stream;
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{log_failure, reclassify, run_catching, run_catching_with, AconAppRepository};
use crate::{
    dto::{ReplaceVerifiedAreaRequest, SavedSpotResponse, UpdateProfileRequest, VerifiedAreaListResponse},
    local::ProfileLocalDataSource,
    model::{ImageType, Profile, ProfileImageStatus, SavedSpot, VerifiedArea},
    remote::ProfileRemoteDataSource,
    stream::{once_per_signal, DataStream, DataStreamExt},
    usecase::validate_nickname_input,
};

/// Профиль, сохранённые места и подтверждённые районы пользователя.
#[derive(Clone)]
pub struct ProfileRepository {
    remote: Arc<dyn ProfileRemoteDataSource>,
    local: Arc<dyn ProfileLocalDataSource>,
    app: AconAppRepository,
    areas: Arc<dyn DataStream>,
}

impl ProfileRepository {
    pub fn new(
        remote: Arc<dyn ProfileRemoteDataSource>,
        local: Arc<dyn ProfileLocalDataSource>,
        app: AconAppRepository,
        areas: Arc<dyn DataStream>,
    ) -> Self {
        Self {
            remote,
            local,
            app,
            areas,
        }
    }

    /// Профиль из кэша; при пустом кэше запрашивается с сервера и кэшируется.
    ///
    /// Поток следит за кэшем: после [`ProfileRepository::update_profile`]
    /// выдаёт обновлённый профиль, после очистки кэша снова идёт на сервер.
    pub fn get_profile(&self) -> BoxStream<'static, AconResult<Profile>> {
        let remote = self.remote.clone();
        let local = self.local.clone();
        cache_first(self.local.profile(), move || {
            let remote = remote.clone();
            let local = local.clone();
            async move {
                let profile = run_catching("get_profile", remote.get_profile().await)?.into_profile();
                local.cache_profile(profile.clone());
                Ok(profile)
            }
        })
    }

    /// Сохраняет профиль на сервере.
    ///
    /// Локальное изображение сначала загружается, и в профиль подставляется
    /// его постоянный URL. Кэш обновляется только после успешного ответа
    /// сервера.
    pub async fn update_profile(
        &self,
        profile: Profile,
    ) -> AconResult<()> {
        let mut to_update = profile;
        if let Some(path) = to_update.image.local_path() {
            let url = self
                .app
                .upload_image(ImageType::Profile, &path)
                .await
                .map_err(reclassify::<UpdateProfileError>)?;
            to_update.image = ProfileImageStatus::Custom(url);
        }

        let request = UpdateProfileRequest::from(&to_update);
        run_catching_with::<UpdateProfileError, _>(
            "update_profile",
            self.remote.update_profile(&request).await,
        )?;

        info!(nickname = %to_update.nickname, "Profile updated");
        self.local.cache_profile(to_update);
        Ok(())
    }

    /// Проверяет никнейм: сначала локально, затем на сервере.
    pub async fn validate_nickname(
        &self,
        nickname: &str,
    ) -> AconResult<()> {
        if let Err(err) = validate_nickname_input(nickname) {
            let err = StackError::new(err);
            log_failure("validate_nickname", &err);
            return Err(err);
        }

        run_catching_with::<ValidateNicknameError, _>(
            "validate_nickname",
            self.remote.validate_nickname(nickname).await,
        )
    }

    /// Сохранённые места, по той же схеме кэширования, что и профиль.
    pub fn get_saved_spots(&self) -> BoxStream<'static, AconResult<Vec<SavedSpot>>> {
        let remote = self.remote.clone();
        let local = self.local.clone();
        cache_first(self.local.saved_spots(), move || {
            let remote = remote.clone();
            let local = local.clone();
            async move {
                let spots: Vec<SavedSpot> =
                    run_catching("get_saved_spots", remote.get_saved_spots().await)?
                        .into_iter()
                        .map(SavedSpotResponse::into_saved_spot)
                        .collect();
                local.cache_saved_spots(spots.clone());
                Ok(spots)
            }
        })
    }

    /// Подтверждённые районы. Список перезапрашивается на каждый сигнал
    /// канала районов, устаревший запрос отменяется.
    pub fn get_verified_areas(&self) -> BoxStream<'static, AconResult<Vec<VerifiedArea>>> {
        let remote = self.remote.clone();
        self.areas.subscribe(once_per_signal(move |signal| {
            let remote = remote.clone();
            async move {
                debug!(generation = signal.generation(), "Fetching verified areas");
                run_catching("get_verified_areas", remote.get_verified_areas().await)
                    .map(VerifiedAreaListResponse::into_verified_areas)
            }
        }))
    }

    /// Удаляет район; сигнал выпускается только после успеха на сервере.
    pub async fn delete_verified_area(
        &self,
        verified_area_id: i64,
    ) -> AconResult<()> {
        run_catching_with::<DeleteVerifiedAreaError, _>(
            "delete_verified_area",
            self.remote.delete_verified_area(verified_area_id).await,
        )?;

        info!(verified_area_id, "Verified area deleted");
        self.areas.notify_data_changed();
        Ok(())
    }

    /// Заменяет район новым, определённым по координатам.
    pub async fn replace_verified_area(
        &self,
        previous_verified_area_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> AconResult<()> {
        let request = ReplaceVerifiedAreaRequest {
            previous_verified_area_id,
            latitude,
            longitude,
        };
        run_catching_with::<ReplaceVerifiedAreaError, _>(
            "replace_verified_area",
            self.remote.replace_verified_area(&request).await,
        )?;

        info!(previous_verified_area_id, "Verified area replaced");
        self.areas.notify_data_changed();
        Ok(())
    }
}

enum Fetch<T> {
    CacheChanged(bool),
    Done(AconResult<T>),
}

/// Поток значения из кэша с догрузкой с сервера при пустом кэше.
///
/// Повторно одинаковое значение не выдаётся. Если кэш меняется во время
/// запроса к серверу, запрос отменяется и решение принимается заново.
fn cache_first<T, F, Fut>(
    mut cached: watch::Receiver<Option<T>>,
    fetch: F,
) -> BoxStream<'static, AconResult<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = AconResult<T>> + Send + 'static,
{
    stream! {
        let mut last: Option<T> = None;

        loop {
            let current = cached.borrow_and_update().clone();
            match current {
                Some(value) => {
                    if last.as_ref() != Some(&value) {
                        last = Some(value.clone());
                        yield Ok(value);
                    }
                }
                None => {
                    last = None;
                    let request = fetch();
                    tokio::pin!(request);
                    let outcome = tokio::select! {
                        biased;
                        changed = cached.changed() => Fetch::CacheChanged(changed.is_ok()),
                        result = &mut request => Fetch::Done(result),
                    };

                    match outcome {
                        Fetch::CacheChanged(true) => continue,
                        Fetch::CacheChanged(false) => return,
                        Fetch::Done(Ok(value)) => {
                            last = Some(value.clone());
                            yield Ok(value);
                        }
                        Fetch::Done(Err(err)) => yield Err(err),
                    }
                }
            }

            if cached.changed().await.is_err() {
                return;
            }
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use acon_error::{RemoteError, StatusCode};
    use chrono::NaiveDate;
    use rstest::rstest;
    use tempfile::TempDir;
    use tokio::time::timeout;

    use super::*;
    use crate::{
        dto::ProfileResponse,
        local::InMemoryProfileCache,
        model::BirthDateStatus,
        repository::testing::FakeRemote,
        stream::ReplayDataStream,
    };

    struct Fixture {
        remote: Arc<FakeRemote>,
        cache: Arc<InMemoryProfileCache>,
        areas: Arc<ReplayDataStream>,
        repo: ProfileRepository,
    }

    fn fixture(remote: FakeRemote) -> Fixture {
        let remote = Arc::new(remote);
        let cache = Arc::new(InMemoryProfileCache::new());
        let areas = Arc::new(ReplayDataStream::new("verified-areas"));
        let repo = ProfileRepository::new(
            remote.clone(),
            cache.clone(),
            AconAppRepository::new(remote.clone()),
            areas.clone(),
        );
        Fixture {
            remote,
            cache,
            areas,
            repo,
        }
    }

    fn server_profile(nickname: &str) -> ProfileResponse {
        ProfileResponse {
            nickname: nickname.into(),
            birth_date: Some("1999.03.14".into()),
            image: None,
        }
    }

    async fn next<T>(flow: &mut BoxStream<'static, T>) -> T {
        timeout(Duration::from_secs(1), flow.next())
            .await
            .expect("stream stalled")
            .expect("stream ended")
    }

    /// Тест проверяет, что при заполненном кэше сервер не вызывается.
    #[tokio::test]
    async fn test_get_profile_from_cache() {
        let fx = fixture(FakeRemote::default());
        fx.cache.cache_profile(Profile::new("cached"));

        let mut flow = fx.repo.get_profile();
        assert_eq!(next(&mut flow).await.unwrap().nickname, "cached");
        assert_eq!(fx.remote.calls("get_profile"), 0);
    }

    /// Тест проверяет загрузку с сервера при пустом кэше и последующее
    /// кэширование.
    #[tokio::test]
    async fn test_get_profile_fetches_and_caches() {
        let fx = fixture(FakeRemote::default());
        *fx.remote.profile.lock() = Some(server_profile("remote"));

        let mut flow = fx.repo.get_profile();
        let profile = next(&mut flow).await.unwrap();
        assert_eq!(profile.nickname, "remote");
        assert_eq!(
            profile.birth_date,
            BirthDateStatus::Specified(NaiveDate::from_ymd_opt(1999, 3, 14).unwrap())
        );
        assert_eq!(fx.cache.profile().borrow().as_ref(), Some(&profile));
        assert_eq!(fx.remote.calls("get_profile"), 1);

        // Второй подписчик читает уже из кэша.
        let mut second = fx.repo.get_profile();
        assert_eq!(next(&mut second).await.unwrap(), profile);
        assert_eq!(fx.remote.calls("get_profile"), 1);
    }

    /// Тест проверяет, что поток профиля видит обновление профиля.
    #[tokio::test]
    async fn test_get_profile_follows_updates() {
        let fx = fixture(FakeRemote::default());
        fx.cache.cache_profile(Profile::new("before"));
        let mut flow = fx.repo.get_profile();
        assert_eq!(next(&mut flow).await.unwrap().nickname, "before");

        fx.repo.update_profile(Profile::new("after")).await.unwrap();
        assert_eq!(next(&mut flow).await.unwrap().nickname, "after");
    }

    /// Тест проверяет, что ошибка сервера приходит элементом потока, а поток
    /// продолжает жить.
    #[tokio::test]
    async fn test_get_profile_error_then_recovery() {
        let fx = fixture(FakeRemote::default());
        fx.remote.fail("get_profile", RemoteError::transport("offline", false));

        let mut flow = fx.repo.get_profile();
        let err = next(&mut flow).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::ConnectionFailed);

        fx.cache.cache_profile(Profile::new("later"));
        assert_eq!(next(&mut flow).await.unwrap().nickname, "later");
    }

    #[tokio::test]
    async fn test_update_profile_failure_keeps_cache() {
        let fx = fixture(FakeRemote::default());
        fx.cache.cache_profile(Profile::new("old"));
        fx.remote
            .fail("update_profile", RemoteError::server(409, Some(40901), "dup"));

        let err = fx.repo.update_profile(Profile::new("taken")).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<UpdateProfileError>(),
            Some(&UpdateProfileError::AlreadyExistNickname)
        );
        assert_eq!(fx.cache.profile().borrow().as_ref().unwrap().nickname, "old");
    }

    /// Тест проверяет, что локальное изображение загружается до сохранения
    /// профиля, а в запрос уходит постоянный URL.
    #[tokio::test]
    async fn test_update_profile_uploads_local_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("avatar.webp");
        std::fs::write(&path, b"webp").unwrap();

        let fx = fixture(FakeRemote::default());
        let profile = Profile::new("acon").with_image(format!("file://{}", path.display()));
        fx.repo.update_profile(profile).await.unwrap();

        let sent = fx.remote.updated_profiles.lock().clone();
        assert_eq!(sent[0].image.as_deref(), Some("https://cdn.test/avatar.webp"));
        assert_eq!(fx.remote.uploads.lock()[0].2, "image/webp");
        assert_eq!(
            fx.cache.profile().borrow().as_ref().unwrap().image,
            ProfileImageStatus::Custom("https://cdn.test/avatar.webp".into())
        );
    }

    /// Тест проверяет, что ошибка загрузки изображения классифицируется как
    /// ошибка обновления профиля.
    #[tokio::test]
    async fn test_update_profile_upload_error_is_classified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("avatar.bmp");
        std::fs::write(&path, b"bmp").unwrap();

        let fx = fixture(FakeRemote::default());
        fx.remote.fail(
            "get_presigned_url",
            RemoteError::server(400, Some(40045), "bad image"),
        );
        let err = fx
            .repo
            .update_profile(Profile::new("acon").with_image(path.display().to_string()))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<UpdateProfileError>(),
            Some(&UpdateProfileError::InvalidImageType)
        );
        assert_eq!(fx.remote.calls("update_profile"), 0);
    }

    #[rstest]
    #[case(Some(40051), Some(ValidateNicknameError::InvalidFormat))]
    #[case(Some(40901), Some(ValidateNicknameError::AlreadyExist))]
    #[case(Some(12345), None)]
    #[case(None, None)]
    #[tokio::test]
    async fn test_validate_nickname_server_codes(
        #[case] code: Option<i32>,
        #[case] expected: Option<ValidateNicknameError>,
    ) {
        let fx = fixture(FakeRemote::default());
        fx.remote
            .fail("validate_nickname", RemoteError::server(400, code, "rejected"));

        let err = fx.repo.validate_nickname("acon").await.unwrap_err();
        assert_eq!(err.downcast_ref::<ValidateNicknameError>().copied(), expected);
        if expected.is_none() {
            assert!(err.is::<RemoteError>());
        }
    }

    /// Тест проверяет, что локальные ошибки никнейма не доходят до сервера.
    #[tokio::test]
    async fn test_validate_nickname_local_checks() {
        let fx = fixture(FakeRemote::default());

        let err = fx.repo.validate_nickname("").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidateNicknameError>(),
            Some(&ValidateNicknameError::EmptyInput)
        );
        let err = fx
            .repo
            .validate_nickname("a-very-long-nickname")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidateNicknameError>(),
            Some(ValidateNicknameError::InputLengthExceeded { .. })
        ));
        assert_eq!(fx.remote.calls("validate_nickname"), 0);

        fx.repo.validate_nickname("acon").await.unwrap();
        assert_eq!(fx.remote.calls("validate_nickname"), 1);
    }

    #[tokio::test]
    async fn test_get_saved_spots_cache_first() {
        let fx = fixture(FakeRemote::default());
        *fx.remote.saved_spots.lock() = vec![SavedSpotResponse {
            spot_id: 1,
            name: "cafe".into(),
            image: Some(" ".into()),
        }];

        let mut flow = fx.repo.get_saved_spots();
        let spots = next(&mut flow).await.unwrap();
        assert_eq!(spots.len(), 1);
        assert_eq!(fx.remote.calls("get_saved_spots"), 1);

        let mut again = fx.repo.get_saved_spots();
        assert_eq!(next(&mut again).await.unwrap(), spots);
        assert_eq!(fx.remote.calls("get_saved_spots"), 1);
    }

    /// Тест проверяет, что удаление района обновляет список у читателя.
    #[tokio::test]
    async fn test_delete_verified_area_refreshes_readers() {
        let fx = fixture(FakeRemote::with_areas(&[(1, "Seongsu"), (2, "Hapjeong")]));
        let mut flow = fx.repo.get_verified_areas();
        assert_eq!(next(&mut flow).await.unwrap().len(), 2);

        fx.repo.delete_verified_area(1).await.unwrap();
        let areas = next(&mut flow).await.unwrap();
        assert_eq!(areas, vec![VerifiedArea::new(2, "Hapjeong")]);
        assert_eq!(fx.areas.generation(), 2);
    }

    /// Тест проверяет, что неудачная мутация не выпускает сигнал.
    #[tokio::test]
    async fn test_failed_delete_does_not_notify() {
        let fx = fixture(FakeRemote::with_areas(&[(1, "Seongsu")]));
        fx.remote
            .fail("delete_verified_area", RemoteError::server(403, None, "not yours"));

        let err = fx.repo.delete_verified_area(1).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeleteVerifiedAreaError>(),
            Some(&DeleteVerifiedAreaError::NotOwner)
        );
        assert_eq!(fx.areas.generation(), 1);
    }

    #[tokio::test]
    async fn test_replace_verified_area() {
        let fx = fixture(FakeRemote::with_areas(&[(1, "Seongsu")]));
        let mut flow = fx.repo.get_verified_areas();
        next(&mut flow).await.unwrap();

        fx.repo.replace_verified_area(1, 37.5, 127.0).await.unwrap();
        let areas = next(&mut flow).await.unwrap();
        assert_eq!(areas.len(), 1);
        assert_ne!(areas[0].verified_area_id, 1);

        let err = fx
            .repo
            .replace_verified_area(999, 0.0, 0.0)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReplaceVerifiedAreaError>(),
            Some(&ReplaceVerifiedAreaError::VerifiedAreaNotFound)
        );
    }
}
