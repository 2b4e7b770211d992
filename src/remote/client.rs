use std::{sync::Arc, time::Duration};

use acon_error::{AconResult, GenericError, RemoteError, StackError, StatusCode};
use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{dto::ErrorResponse, local::TokenStore};

/// HTTP-клиент API приложения.
///
/// Добавляет токен доступа из [`TokenStore`] к каждому запросу (токен
/// читается заново при каждом вызове), разбирает тело ошибки сервера в
/// [`RemoteError::Server`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
        tokens: Arc<TokenStore>,
    ) -> AconResult<Self> {
        Url::parse(base_url).map_err(|e| {
            StackError::new(GenericError::new(
                StatusCode::InvalidArgs,
                format!("invalid api base url {base_url:?}: {e}"),
            ))
        })?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                StackError::new(GenericError::new(
                    StatusCode::Internal,
                    format!("failed to build http client: {e}"),
                ))
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Запрос к API с авторизацией, если токен есть.
    pub fn request(
        &self,
        method: Method,
        path: &str,
    ) -> RequestBuilder {
        let builder = self.anonymous_request(method, path);
        match self.tokens.access_token().filter(|t| !t.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Запрос к API без заголовка Authorization.
    pub fn anonymous_request(
        &self,
        method: Method,
        path: &str,
    ) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Отправляет готовый запрос и декодирует JSON-ответ.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = self.send(builder).await?;
        decode(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, RemoteError> {
        self.fetch_json(self.request(Method::GET, path)).await
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        decode(response).await
    }

    /// Запрос, тело ответа которого не интересно.
    pub async fn execute(
        &self,
        builder: RequestBuilder,
    ) -> Result<(), RemoteError> {
        self.send(builder).await.map(drop)
    }

    /// Загружает байты по абсолютному presigned-адресу. Без авторизации.
    pub async fn put_bytes(
        &self,
        url: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<(), RemoteError> {
        let builder = self
            .http
            .put(url)
            .header(header::CONTENT_TYPE, mime)
            .body(bytes);
        self.send(builder).await.map(drop)
    }

    async fn send(
        &self,
        builder: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_else(|e| {
            debug!(error = %e, "Failed to read error response body");
            Default::default()
        });
        let err = server_error(status.as_u16(), &body);
        warn!(error = %err, "API request failed");
        Err(err)
    }
}

#[cfg(test)]
impl ApiClient {
    /// Клиент для локального тестового сервера: без системного прокси.
    pub(crate) fn for_local_server(
        base_url: &str,
        tokens: Arc<TokenStore>,
    ) -> Self {
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').into(),
            tokens,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::decode(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_decode() {
        return RemoteError::decode(err.to_string());
    }
    if err.is_builder() {
        return RemoteError::encode(err.to_string());
    }
    RemoteError::transport(err.to_string(), err.is_timeout())
}

/// Разбирает тело неуспешного ответа. Тело без кода сохраняется как текст.
pub(crate) fn server_error(
    status: u16,
    body: &[u8],
) -> RemoteError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(parsed) => RemoteError::server(status, Some(parsed.code), parsed.message.unwrap_or_default()),
        Err(_) => RemoteError::server(status, None, String::from_utf8_lossy(body).into_owned()),
    }
}
