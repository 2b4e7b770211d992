use tokio::sync::watch;
use tracing::debug;

use crate::model::{Profile, SavedSpot};

/// Локальный кэш профиля и сохранённых мест.
///
/// `None` в наблюдаемом значении означает «кэш пуст, нужно идти на сервер».
pub trait ProfileLocalDataSource: Send + Sync {
    fn cache_profile(
        &self,
        profile: Profile,
    );

    /// Наблюдаемое значение профиля. Текущее значение доступно сразу.
    fn profile(&self) -> watch::Receiver<Option<Profile>>;

    fn cache_saved_spots(
        &self,
        spots: Vec<SavedSpot>,
    );

    fn saved_spots(&self) -> watch::Receiver<Option<Vec<SavedSpot>>>;

    /// Сбрасывает оба кэша.
    fn clear_cache(&self);
}

/// Кэш в памяти процесса.
#[derive(Debug)]
pub struct InMemoryProfileCache {
    profile: watch::Sender<Option<Profile>>,
    saved_spots: watch::Sender<Option<Vec<SavedSpot>>>,
}

impl InMemoryProfileCache {
    pub fn new() -> Self {
        Self {
            profile: watch::Sender::new(None),
            saved_spots: watch::Sender::new(None),
        }
    }
}

impl Default for InMemoryProfileCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLocalDataSource for InMemoryProfileCache {
    fn cache_profile(
        &self,
        profile: Profile,
    ) {
        debug!(nickname = %profile.nickname, "Profile cached");
        self.profile.send_replace(Some(profile));
    }

    fn profile(&self) -> watch::Receiver<Option<Profile>> {
        self.profile.subscribe()
    }

    fn cache_saved_spots(
        &self,
        spots: Vec<SavedSpot>,
    ) {
        debug!(count = spots.len(), "Saved spots cached");
        self.saved_spots.send_replace(Some(spots));
    }

    fn saved_spots(&self) -> watch::Receiver<Option<Vec<SavedSpot>>> {
        self.saved_spots.subscribe()
    }

    fn clear_cache(&self) {
        self.profile.send_replace(None);
        self.saved_spots.send_replace(None);
        debug!("Profile cache cleared");
    }
}
