//! Удалённые источники данных: HTTP API приложения.

pub mod client;
pub mod http;
pub mod source;

pub use client::ApiClient;
pub use http::HttpDataSource;
pub use source::{AconAppRemoteDataSource, OnboardingRemoteDataSource, ProfileRemoteDataSource};
