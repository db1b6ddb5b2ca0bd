use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Embedding vector of an event description, one row per event.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_embedding")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: Uuid,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: HasOne<super::event::Entity>,

    /// Name of the model that produced the vector.
    pub model: String,
    /// JSON array of floats.
    #[sea_orm(column_type = "JsonBinary")]
    pub vector: serde_json::Value,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
