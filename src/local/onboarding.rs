use std::path::{Path, PathBuf};

use acon_error::{AconResult, GenericError, ResultExt, StackError, StatusCode};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::model::OnboardingPreferences;

/// Хранилище настроек онбординга.
///
/// Если задан путь, настройки хранятся в JSON-файле и переживают
/// перезапуск; иначе живут только в памяти. Отсутствующий файл означает
/// настройки по умолчанию.
#[derive(Debug)]
pub struct OnboardingStore {
    path: Option<PathBuf>,
    state: Mutex<OnboardingPreferences>,
}

impl OnboardingStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(OnboardingPreferences::default()),
        }
    }

    /// Открывает файловое хранилище и читает текущее состояние.
    pub async fn open(path: impl Into<PathBuf>) -> AconResult<Self> {
        let path = path.into();
        let prefs = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StackError::new(GenericError::new(
                    StatusCode::DecodingError,
                    format!("invalid onboarding file {}: {e}", path.display()),
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Onboarding file not found, using defaults");
                OnboardingPreferences::default()
            }
            Err(e) => return Err(StackError::from(e).context("reading onboarding preferences")),
        };

        Ok(Self {
            path: Some(path),
            state: Mutex::new(prefs),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn preferences(&self) -> OnboardingPreferences {
        *self.state.lock().await
    }

    /// Применяет изменение и сохраняет результат.
    ///
    /// Если запись на диск не удалась, состояние в памяти не меняется.
    pub async fn update<F>(
        &self,
        f: F,
    ) -> AconResult<OnboardingPreferences>
    where
        F: FnOnce(&mut OnboardingPreferences),
    {
        let mut state = self.state.lock().await;
        let mut next = *state;
        f(&mut next);

        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }
        *state = next;
        debug!(prefs = ?next, "Onboarding preferences updated");
        Ok(next)
    }

    pub async fn set_should_show_introduce(
        &self,
        value: bool,
    ) -> AconResult<OnboardingPreferences> {
        self.update(|p| p.should_show_introduce = value).await
    }

    pub async fn set_should_choose_dislikes(
        &self,
        value: bool,
    ) -> AconResult<OnboardingPreferences> {
        self.update(|p| p.should_choose_dislikes = value).await
    }

    pub async fn set_should_verify_area(
        &self,
        value: bool,
    ) -> AconResult<OnboardingPreferences> {
        self.update(|p| p.should_verify_area = value).await
    }
}

/// Атомарная запись: временный файл рядом с целевым и `rename`.
async fn persist(
    path: &Path,
    prefs: &OnboardingPreferences,
) -> AconResult<()> {
    let bytes = serde_json::to_vec_pretty(prefs).map_err(|e| {
        StackError::new(GenericError::new(StatusCode::EncodingError, e.to_string()))
    })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes)
        .await
        .with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Тест проверяет, что отсутствующий файл даёт настройки по умолчанию.
    #[tokio::test]
    async fn test_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        let store = OnboardingStore::open(dir.path().join("onboarding.json"))
            .await
            .unwrap();

        assert_eq!(store.preferences().await, OnboardingPreferences::default());
    }

    /// Тест проверяет, что изменения переживают повторное открытие.
    #[tokio::test]
    async fn test_persisted_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("onboarding.json");

        let store = OnboardingStore::open(&path).await.unwrap();
        store.set_should_verify_area(false).await.unwrap();
        store.set_should_show_introduce(false).await.unwrap();
        drop(store);

        let reopened = OnboardingStore::open(&path).await.unwrap();
        let prefs = reopened.preferences().await;
        assert!(!prefs.should_verify_area);
        assert!(!prefs.should_show_introduce);
        assert!(prefs.should_choose_dislikes);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("onboarding.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = OnboardingStore::open(&path).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::DecodingError);
    }

    #[tokio::test]
    async fn test_in_memory() {
        let store = OnboardingStore::in_memory();
        assert!(store.path().is_none());
        let prefs = store.set_should_choose_dislikes(false).await.unwrap();
        assert!(!prefs.should_choose_dislikes);
        assert_eq!(store.preferences().await, prefs);
    }
}
