//! Сборка слоя данных из настроек.

use std::sync::Arc;

use acon_error::AconResult;
use tracing::info;

use crate::{
    config::Settings,
    local::{InMemoryProfileCache, OnboardingStore, ProfileLocalDataSource, TokenStore},
    remote::{
        AconAppRemoteDataSource, ApiClient, HttpDataSource, OnboardingRemoteDataSource,
        ProfileRemoteDataSource,
    },
    repository::{AconAppRepository, OnboardingRepository, ProfileRepository},
    session::SessionHandler,
    stream::{DataStream, ReplayDataStream},
};

/// Имя канала подтверждённых районов.
pub const VERIFIED_AREAS_STREAM: &str = "verified-areas";

/// Удалённые источники, из которых собирается [`DataCore`].
#[derive(Clone)]
pub struct RemoteSources {
    pub profile: Arc<dyn ProfileRemoteDataSource>,
    pub onboarding: Arc<dyn OnboardingRemoteDataSource>,
    pub app: Arc<dyn AconAppRemoteDataSource>,
}

impl RemoteSources {
    /// Все три источника обслуживаются одним HTTP-клиентом.
    pub fn http(api: ApiClient) -> Self {
        let http = Arc::new(HttpDataSource::new(api));
        Self {
            profile: http.clone(),
            onboarding: http.clone(),
            app: http,
        }
    }
}

/// Корень слоя данных.
///
/// Владеет единственным каналом районов: каждый репозиторий, который
/// читает или меняет районы, получает ссылку на один и тот же канал.
/// Уничтожение `DataCore` и всех репозиториев закрывает канал, и потоки
/// подписчиков завершаются.
pub struct DataCore {
    pub tokens: Arc<TokenStore>,
    pub session: SessionHandler,
    pub profile: ProfileRepository,
    pub onboarding: OnboardingRepository,
    pub app: AconAppRepository,
    verified_areas: Arc<ReplayDataStream>,
}

impl DataCore {
    /// Собирает слой данных с HTTP-клиентом из настроек.
    pub async fn new(settings: &Settings) -> AconResult<Self> {
        settings.validate()?;

        let tokens = Arc::new(match &settings.access_token {
            Some(token) => TokenStore::with_access_token(token.clone()),
            None => TokenStore::new(),
        });
        let api = ApiClient::new(
            &settings.api_base_url,
            settings.request_timeout(),
            &settings.user_agent,
            tokens.clone(),
        )?;
        let store = match &settings.onboarding_path {
            Some(path) => OnboardingStore::open(path).await?,
            None => OnboardingStore::in_memory(),
        };

        info!(api = %settings.api_base_url, "Data core initialized");
        Ok(Self::with_sources(RemoteSources::http(api), tokens, store))
    }

    /// Собирает слой данных поверх произвольных источников.
    pub fn with_sources(
        remote: RemoteSources,
        tokens: Arc<TokenStore>,
        store: OnboardingStore,
    ) -> Self {
        let verified_areas = Arc::new(ReplayDataStream::new(VERIFIED_AREAS_STREAM));
        let areas: Arc<dyn DataStream> = verified_areas.clone();
        let cache: Arc<dyn ProfileLocalDataSource> = Arc::new(InMemoryProfileCache::new());

        let app = AconAppRepository::new(remote.app);
        let profile = ProfileRepository::new(remote.profile, cache.clone(), app.clone(), areas.clone());
        let onboarding = OnboardingRepository::new(remote.onboarding, Arc::new(store), areas);
        let session = SessionHandler::new(tokens.clone(), cache);

        Self {
            tokens,
            session,
            profile,
            onboarding,
            app,
            verified_areas,
        }
    }

    /// Канал районов, общий для всех репозиториев.
    pub fn verified_areas(&self) -> &ReplayDataStream {
        &self.verified_areas
    }
}
