use chrono::Utc;
use sea_orm::*;
use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::config::PhotoConfig;
use crate::entity::event;
use crate::entity::photo::{self, DEFAULT_EVENT_PHOTO};

/// Make sure the reserved default event photo exists.
pub async fn seed_default_photo(db: &DatabaseConnection, config: &PhotoConfig) -> Result<(), DbErr> {
    let model = photo::ActiveModel {
        photo_name: Set(DEFAULT_EVENT_PHOTO.to_string()),
        url: Set(config.default_photo_url.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = photo::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(photo::Column::PhotoName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => Ok(()),
        Ok(_) => {
            info!("Seeded default event photo '{}'", DEFAULT_EVENT_PHOTO);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Live-window queries:
    // SELECT ... FROM event WHERE start_at <= ? AND expire_at >= ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_event_start_expire")
        .table(event::Entity)
        .col(event::Column::StartAt)
        .col(event::Column::ExpireAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_event_start_expire exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_event_start_expire: {}", e);
        }
    }

    Ok(())
}
