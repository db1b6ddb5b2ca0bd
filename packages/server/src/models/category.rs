use serde::{Deserialize, Serialize};

use super::shared::validate_text;
use crate::error::AppError;

/// Request body for creating or renaming a category. Also used inside
/// `EventRequest` to reference an existing category by name.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CategoryRequest {
    /// Unique category name (1-64 characters).
    #[schema(example = "Music")]
    pub name: String,
}

pub fn validate_category_request(req: &CategoryRequest) -> Result<(), AppError> {
    validate_text(&req.name, "Category name", 64)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Music")]
    pub name: String,
}

impl From<crate::entity::category::Model> for CategoryResponse {
    fn from(m: crate::entity::category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
