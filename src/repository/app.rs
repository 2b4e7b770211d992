use std::{path::Path, sync::Arc};

use acon_error::{AconResult, FetchShouldUpdateError, GenericError, ResultExt, StackError, StatusCode};
use tracing::info;

use super::{run_catching, run_catching_with};
use crate::{dto::GetPresignedUrlRequest, model::ImageType, remote::AconAppRemoteDataSource};

/// Общие операции приложения.
#[derive(Clone)]
pub struct AconAppRepository {
    remote: Arc<dyn AconAppRemoteDataSource>,
}

impl AconAppRepository {
    pub fn new(remote: Arc<dyn AconAppRemoteDataSource>) -> Self {
        Self { remote }
    }

    /// Нужно ли обновить приложение версии `current_version`.
    ///
    /// Сервер может не прислать флаг; это значит, что обновление не требуется.
    pub async fn should_update_app(
        &self,
        current_version: &str,
    ) -> AconResult<bool> {
        let response = run_catching_with::<FetchShouldUpdateError, _>(
            "should_update_app",
            self.remote.fetch_should_update_app(current_version).await,
        )?;
        let should_update = response.should_update.unwrap_or(false);
        info!(current_version, should_update, "App update checked");
        Ok(should_update)
    }

    /// Загружает локальный файл изображения и возвращает его постоянный URL.
    ///
    /// Запрос presigned-адреса и чтение файла выполняются параллельно.
    pub async fn upload_image(
        &self,
        image_type: ImageType,
        path: impl AsRef<Path>,
    ) -> AconResult<String> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StackError::new(GenericError::new(
                    StatusCode::InvalidArgs,
                    format!("Failed to read file name: {}", path.display()),
                ))
            })?;

        let request = GetPresignedUrlRequest {
            image_type,
            original_file_name: file_name.to_owned(),
        };
        let (presigned, bytes) =
            tokio::join!(self.remote.get_presigned_url(&request), tokio::fs::read(path));

        let presigned = run_catching("upload_image", presigned)?;
        let bytes =
            bytes.with_context(|| format!("Failed to read image content: {}", path.display()))?;
        let size = bytes.len();

        run_catching(
            "upload_image",
            self.remote
                .upload_file(&presigned.presigned_url, bytes, image_mime_type(path))
                .await,
        )?;

        info!(%image_type, file = file_name, size, "Image uploaded");
        Ok(presigned.file_url)
    }
}

/// MIME-тип изображения по расширению файла.
///
/// Поддерживаются jpg, jpeg, png, webp и heic; всё остальное отправляется
/// как `image/jpeg`.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}
