use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reserved photo name rendered for events that have no photos of their own.
pub const DEFAULT_EVENT_PHOTO: &str = "eventDefaultImage";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub photo_name: String,
    /// Storage reference (URL or object key). The bytes live elsewhere.
    pub url: String,

    #[sea_orm(has_many, via = "event_photo")]
    pub events: HasMany<super::event::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
