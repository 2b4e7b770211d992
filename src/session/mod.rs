//! Сессия пользователя: токены и состояние входа.

use std::sync::Arc;

use acon_error::{bail, AconResult, StatusCode};
use tokio::sync::watch;
use tracing::info;

use crate::{
    dto::SignInResponse,
    local::{ProfileLocalDataSource, TokenStore},
    model::SignInStatus,
};

/// Управляет токенами и публикует состояние входа.
pub struct SessionHandler {
    tokens: Arc<TokenStore>,
    profile_cache: Arc<dyn ProfileLocalDataSource>,
    status: watch::Sender<SignInStatus>,
}

impl SessionHandler {
    /// Начальное состояние определяется наличием токена доступа.
    pub fn new(
        tokens: Arc<TokenStore>,
        profile_cache: Arc<dyn ProfileLocalDataSource>,
    ) -> Self {
        let initial = if tokens.has_access_token() {
            SignInStatus::User
        } else {
            SignInStatus::Guest
        };

        Self {
            tokens,
            profile_cache,
            status: watch::Sender::new(initial),
        }
    }

    /// Наблюдаемое состояние входа. Текущее значение доступно сразу.
    pub fn sign_in_status(&self) -> watch::Receiver<SignInStatus> {
        self.status.subscribe()
    }

    pub fn current_status(&self) -> SignInStatus {
        *self.status.borrow()
    }

    pub fn complete_sign_in(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) {
        self.tokens.save_access_token(access_token);
        self.tokens.save_refresh_token(refresh_token);
        self.status.send_replace(SignInStatus::User);
        info!("Signed in");
    }

    /// Сохраняет токены из ответа на вход.
    ///
    /// Состояние входа не меняется, пока вызывающая сторона не вызовет
    /// [`SessionHandler::complete_sign_in`] (например, после онбординга).
    pub fn on_sign_in_response(
        &self,
        response: &SignInResponse,
    ) -> AconResult<()> {
        let Some(access) = response.access_token.as_deref() else {
            bail!(StatusCode::InvalidData, "Access token is null");
        };
        let Some(refresh) = response.refresh_token.as_deref() else {
            bail!(StatusCode::InvalidData, "Refresh token is null");
        };

        self.tokens.save_access_token(access);
        self.tokens.save_refresh_token(refresh);
        Ok(())
    }

    /// Выход: удаляет токены и сбрасывает кэш профиля.
    pub fn clear_session(&self) {
        self.tokens.remove_all_tokens();
        self.profile_cache.clear_cache();
        self.status.send_replace(SignInStatus::Guest);
        info!("Session cleared");
    }
}
