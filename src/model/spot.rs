use serde::{Deserialize, Serialize};

/// Место, сохранённое пользователем.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSpot {
    pub spot_id: i64,
    pub name: String,
    pub thumbnail: SpotThumbnailStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpotThumbnailStatus {
    #[default]
    Empty,
    Exist(String),
}
