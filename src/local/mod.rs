//! Локальные источники данных: кэш профиля, настройки онбординга, токены.

pub mod onboarding;
pub mod profile_cache;
pub mod token;

pub use onboarding::OnboardingStore;
pub use profile_cache::{InMemoryProfileCache, ProfileLocalDataSource};
pub use token::TokenStore;
