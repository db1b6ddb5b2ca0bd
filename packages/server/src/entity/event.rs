use common::EventState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,

    pub max_participants: i32,
    #[sea_orm(default_value = 0)]
    pub participant_count: i32,
    pub with_owner: bool,

    #[sea_orm(indexed)]
    pub start_at: DateTimeUtc,
    #[sea_orm(indexed)]
    pub expire_at: DateTimeUtc,
    /// State derived at the last write. Kept fresh by the lifecycle refresher,
    /// never used when rendering.
    #[sea_orm(indexed)]
    pub state: EventState,

    pub owner_id: i32,
    #[sea_orm(belongs_to, from = "owner_id", to = "id")]
    pub owner: HasOne<super::user::Entity>,

    #[sea_orm(has_many, via = "event_category")]
    pub categories: HasMany<super::category::Entity>,

    #[sea_orm(has_many, via = "event_photo")]
    pub photos: HasMany<super::photo::Entity>,

    #[sea_orm(has_one)]
    pub embedding: HasOne<super::event_embedding::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
