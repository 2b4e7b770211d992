//! Слой данных клиента Acon.
//!
//! Ядро библиотеки: канал уведомлений об изменении данных
//! ([`stream::ReplayDataStream`]) с подпиской по принципу «побеждает последний
//! сигнал». Репозитории, меняющие подтверждённые районы, выпускают сигнал;
//! читатели районов перезапрашивают список с сервера.

/// Настройки клиента.
pub mod config;
/// Сборка слоя данных.
pub mod data_core;
/// Объекты обмена с API.
pub mod dto;
/// Локальные кэши и хранилища.
pub mod local;
/// Логирование (фильтры, форматы, файловый вывод).
pub mod logging;
/// Доменные модели.
pub mod model;
/// HTTP-источники данных.
pub mod remote;
/// Репозитории.
pub mod repository;
/// Сессия пользователя.
pub mod session;
/// Каналы уведомлений об изменении данных.
pub mod stream;
/// Проверки пользовательского ввода.
pub mod usecase;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

pub use acon_error::{AconResult, StackError, StatusCode};
pub use config::Settings;
pub use data_core::{DataCore, RemoteSources, VERIFIED_AREAS_STREAM};
pub use logging::{init_logging, LoggingConfig, LoggingHandle};
pub use model::{
    BirthDateStatus, ImageType, OnboardingPreferences, Profile, ProfileImageStatus, SavedSpot,
    SignInStatus, SpotThumbnailStatus, VerifiedArea,
};
pub use repository::{AconAppRepository, OnboardingRepository, ProfileRepository};
pub use session::SessionHandler;
pub use stream::{DataStream, DataStreamExt, ReplayDataStream, Signal};
