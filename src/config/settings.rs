use std::{path::{Path, PathBuf}, time::Duration};

use acon_error::{ensure, AconResult, StatusCode};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://api.acon.world";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Настройки клиента.
///
/// Источники в порядке приоритета: переменные окружения `ACON_*`
/// (вложенные поля через `__`, например `ACON_LOGGING__LEVEL`), затем
/// TOML-файл, затем значения по умолчанию.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
    /// Токен доступа, если сессия уже есть.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Файл настроек онбординга; без него настройки живут в памяти.
    #[serde(default)]
    pub onboarding_path: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Значения по умолчанию
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_ms", DEFAULT_REQUEST_TIMEOUT_MS)?
            .set_default("user_agent", concat!("acon/", env!("CARGO_PKG_VERSION")))?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            // Переменные окружения с префиксом ACON_
            .add_source(
                Environment::with_prefix("ACON")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> AconResult<()> {
        ensure!(
            self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"),
            StatusCode::InvalidArgs,
            "api_base_url must be an http(s) url, got {:?}",
            self.api_base_url
        );
        ensure!(
            self.request_timeout_ms > 0,
            StatusCode::InvalidArgs,
            "request_timeout_ms must be positive"
        );
        self.logging.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: concat!("acon/", env!("CARGO_PKG_VERSION")).to_string(),
            access_token: None,
            onboarding_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::logging::LogFormat;

    fn clear_env() {
        for key in [
            "ACON_API_BASE_URL",
            "ACON_REQUEST_TIMEOUT_MS",
            "ACON_LOGGING__LEVEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert!(settings.onboarding_path.is_none());
        assert_eq!(settings.logging, LoggingConfig::default());
        settings.validate().unwrap();
    }

    /// Тест проверяет чтение TOML-файла и приоритет окружения над файлом.
    #[test]
    #[serial]
    fn test_file_then_env() {
        clear_env();
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"
api_base_url = "http://localhost:8080"
request_timeout_ms = 2500
onboarding_path = "/tmp/acon/onboarding.json"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.request_timeout_ms, 2500);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert!(settings.logging.console_enabled);

        env::set_var("ACON_REQUEST_TIMEOUT_MS", "700");
        env::set_var("ACON_LOGGING__LEVEL", "warn");
        let settings = Settings::load(Some(file.path())).unwrap();
        clear_env();
        assert_eq!(settings.request_timeout_ms, 700);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            api_base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            settings.validate().unwrap_err().status_code(),
            StatusCode::InvalidArgs
        );

        let settings = Settings {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
