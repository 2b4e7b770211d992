use parking_lot::RwLock;

/// Хранилище токенов доступа текущей сессии.
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: RwLock<Tokens>,
}

#[derive(Debug, Default, Clone)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с уже известным токеном доступа (например, из настроек).
    pub fn with_access_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.save_access_token(token);
        store
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.read().access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.read().refresh.clone()
    }

    pub fn save_access_token(
        &self,
        token: impl Into<String>,
    ) {
        self.inner.write().access = Some(token.into());
    }

    pub fn save_refresh_token(
        &self,
        token: impl Into<String>,
    ) {
        self.inner.write().refresh = Some(token.into());
    }

    pub fn remove_all_tokens(&self) {
        *self.inner.write() = Tokens::default();
    }

    /// Есть ли непустой токен доступа.
    pub fn has_access_token(&self) -> bool {
        self.inner
            .read()
            .access
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_remove() {
        let store = TokenStore::new();
        assert!(!store.has_access_token());

        store.save_access_token("a");
        store.save_refresh_token("r");
        assert_eq!(store.access_token().as_deref(), Some("a"));
        assert_eq!(store.refresh_token().as_deref(), Some("r"));
        assert!(store.has_access_token());

        store.remove_all_tokens();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    /// Тест проверяет, что пустой токен не считается входом.
    #[test]
    fn test_empty_access_token() {
        let store = TokenStore::with_access_token("");
        assert!(!store.has_access_token());
    }
}
