use serde::{Deserialize, Serialize};

/// Какие шаги онбординга ещё нужно показать.
///
/// Новый пользователь проходит все шаги, поэтому по умолчанию все флаги
/// включены. Отсутствующие в файле поля тоже считаются `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingPreferences {
    pub should_show_introduce: bool,
    pub should_choose_dislikes: bool,
    pub should_verify_area: bool,
}

impl Default for OnboardingPreferences {
    fn default() -> Self {
        Self {
            should_show_introduce: true,
            should_choose_dislikes: true,
            should_verify_area: true,
        }
    }
}
