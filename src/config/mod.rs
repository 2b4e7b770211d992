//! Загрузка настроек клиента.

pub mod settings;

pub use settings::{Settings, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_MS};
