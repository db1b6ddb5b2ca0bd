use std::time::Duration;

use chrono::{DateTime, Utc};
use common::EventState;
use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use tracing::{debug, error, info};

use crate::config::LifecycleConfig;
use crate::entity::event;
use crate::services::event::state_condition;

/// Run the state refresher as a background task.
///
/// Rendering never trusts the stored `state` column, but storage-level queries
/// may; this keeps it from drifting between writes.
pub async fn run_state_refresher(db: DatabaseConnection, config: LifecycleConfig) {
    let scan_interval = Duration::from_secs(config.refresh_interval_secs.max(1));

    info!(
        interval_secs = config.refresh_interval_secs,
        "Starting event state refresher"
    );

    let mut interval = tokio::time::interval(scan_interval);

    loop {
        interval.tick().await;

        match refresh_stale_states(&db, Utc::now()).await {
            Ok(0) => debug!("No stale event states"),
            Ok(updated) => info!(updated, "Refreshed stale event states"),
            Err(e) => error!(error = %e, "Event state refresh failed"),
        }
    }
}

/// Rewrite the stored state of every event whose value differs from the one
/// derived at `now`. Returns the number of rows changed.
pub async fn refresh_stale_states(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let mut updated = 0;
    for &state in EventState::ALL {
        let result = event::Entity::update_many()
            .col_expr(event::Column::State, Expr::value(state.as_str()))
            .filter(state_condition(state, now))
            .filter(event::Column::State.ne(state.as_str()))
            .exec(&txn)
            .await?;
        updated += result.rows_affected;
    }

    txn.commit().await?;
    Ok(updated)
}
