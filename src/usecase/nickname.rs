use acon_error::ValidateNicknameError;

/// Максимальная длина никнейма в символах.
pub const MAX_NICKNAME_LENGTH: usize = 16;

/// Локальная проверка никнейма перед запросом к серверу.
///
/// Длина считается в символах Unicode. Допустимость символов и уникальность
/// проверяет сервер.
pub fn validate_nickname_input(nickname: &str) -> Result<(), ValidateNicknameError> {
    if nickname.is_empty() {
        return Err(ValidateNicknameError::EmptyInput);
    }
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(ValidateNicknameError::InputLengthExceeded {
            max: MAX_NICKNAME_LENGTH,
        });
    }
    Ok(())
}
