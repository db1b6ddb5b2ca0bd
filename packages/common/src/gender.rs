#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Self-declared gender on a user profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum Gender {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Male"))]
    Male,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Female"))]
    Female,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Other"))]
    Other,
}
