use serde::{Deserialize, Serialize};

use super::shared::validate_text;
use crate::error::AppError;

/// Request body for registering or replacing a photo record.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PhotoRequest {
    /// Unique photo name (1-128 characters).
    #[schema(example = "riverside-stage")]
    pub photo_name: String,
    /// Where the image bytes are stored.
    #[schema(example = "https://cdn.example.com/photos/riverside-stage.jpg")]
    pub url: String,
}

pub fn validate_photo_request(req: &PhotoRequest) -> Result<(), AppError> {
    validate_text(&req.photo_name, "Photo name", 128)?;
    validate_text(&req.url, "Photo url", 2048)
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PhotoResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "riverside-stage")]
    pub photo_name: String,
    #[schema(example = "https://cdn.example.com/photos/riverside-stage.jpg")]
    pub url: String,
}

impl From<crate::entity::photo::Model> for PhotoResponse {
    fn from(m: crate::entity::photo::Model) -> Self {
        Self {
            id: m.id,
            photo_name: m.photo_name,
            url: m.url,
        }
    }
}
