use std::{fmt, path::PathBuf, str::FromStr};

use acon_error::{ensure, AconResult, StatusCode};
use serde::{Deserialize, Serialize};

/// Переменная окружения с директивой фильтра; приоритетнее `RUST_LOG`.
pub const LOG_ENV: &str = "ACON_LOG";

/// Формат вывода событий.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

/// Настройки логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Базовый уровень (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Дополнительные директивы `EnvFilter`, например `acon::stream=trace`.
    pub directives: Vec<String>,
    pub format: LogFormat,
    pub console_enabled: bool,
    pub with_ansi: bool,
    pub with_target: bool,
    /// Включает запись в файл с ежедневной ротацией.
    pub file_enabled: bool,
    pub log_dir: PathBuf,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directives: Vec::new(),
            format: LogFormat::Compact,
            console_enabled: true,
            with_ansi: true,
            with_target: true,
            file_enabled: false,
            log_dir: PathBuf::from("logs"),
            file_prefix: "acon.log".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl LoggingConfig {
    /// Проверяет согласованность настроек.
    pub fn validate(&self) -> AconResult<()> {
        ensure!(
            matches!(
                self.level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace" | "off"
            ),
            StatusCode::InvalidArgs,
            "unknown log level {:?}",
            self.level
        );
        ensure!(
            !self.file_enabled || !self.file_prefix.is_empty(),
            StatusCode::InvalidArgs,
            "file logging requires a file prefix"
        );
        Ok(())
    }

    /// Создаёт каталог для файловых логов, если он нужен.
    pub fn ensure_log_dir(&self) -> AconResult<()> {
        if self.file_enabled {
            std::fs::create_dir_all(&self.log_dir)?;
        }
        Ok(())
    }

    /// Директива `EnvFilter`, собранная из уровня и дополнительных директив.
    pub fn build_filter_directive(&self) -> String {
        std::iter::once(self.level.to_ascii_lowercase())
            .chain(self.directives.iter().cloned())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LoggingConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.build_filter_directive(), "info");
    }

    /// Тест проверяет склейку уровня и дополнительных директив.
    #[test]
    fn test_filter_directive_with_extras() {
        let cfg = LoggingConfig {
            level: "WARN".into(),
            directives: vec!["acon::stream=trace".into(), "reqwest=off".into()],
            ..Default::default()
        };
        assert_eq!(
            cfg.build_filter_directive(),
            "warn,acon::stream=trace,reqwest=off"
        );
    }

    #[test]
    fn test_invalid_level() {
        let cfg = LoggingConfig {
            level: "loud".into(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InvalidArgs);
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
