use acon_error::ValidateBirthDateError;
use chrono::{Datelike, Local, NaiveDate};

/// Самый ранний допустимый год рождения; граница 1 января этого года.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Проверяет дату рождения относительно `today`.
///
/// Граничные значения (1900-01-01 и сам `today`) допустимы.
pub fn validate_birth_date(
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidateBirthDateError> {
    if date.year() < MIN_BIRTH_YEAR {
        return Err(ValidateBirthDateError::InputIsTooPast);
    }
    if date > today {
        return Err(ValidateBirthDateError::InputIsFuture);
    }
    Ok(())
}

/// Разбирает ввод пользователя вида `yyyyMMdd`.
///
/// Ровно восемь ASCII-цифр, образующих существующую дату; иначе `None`.
pub fn parse_birth_date_input(input: &str) -> Option<NaiveDate> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = input[0..4].parse().ok()?;
    let month = input[4..6].parse().ok()?;
    let day = input[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Проверка даты рождения по локальным часам.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateBirthDate;

impl ValidateBirthDate {
    pub fn new() -> Self {
        Self
    }

    pub fn call(
        &self,
        date: NaiveDate,
    ) -> Result<(), ValidateBirthDateError> {
        validate_birth_date(date, Local::now().date_naive())
    }

    /// Разбор и проверка строки `yyyyMMdd` за один шаг.
    pub fn call_input(
        &self,
        input: &str,
    ) -> Result<NaiveDate, ValidateBirthDateError> {
        let date = parse_birth_date_input(input).ok_or(ValidateBirthDateError::InvalidFormat)?;
        self.call(date)?;
        Ok(date)
    }
}
