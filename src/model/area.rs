use serde::{Deserialize, Serialize};

/// Район, подтверждённый пользователем по геолокации.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerifiedArea {
    pub verified_area_id: i64,
    pub name: String,
}

impl VerifiedArea {
    pub fn new(
        verified_area_id: i64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            verified_area_id,
            name: name.into(),
        }
    }
}
