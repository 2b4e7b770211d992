//! Объекты обмена с API и их преобразование в доменные модели.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
