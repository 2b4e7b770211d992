//! Локальные проверки пользовательского ввода.

pub mod birth_date;
pub mod nickname;

pub use birth_date::{parse_birth_date_input, validate_birth_date, ValidateBirthDate, MIN_BIRTH_YEAR};
pub use nickname::{validate_nickname_input, MAX_NICKNAME_LENGTH};
