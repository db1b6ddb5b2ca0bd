pub mod category;
pub mod event;
pub mod photo;
pub mod user;

pub use category::CategoryService;
pub use event::{EventDetails, EventService};
pub use photo::PhotoService;
pub use user::UserService;

use sea_orm::{DbErr, SqlErr};

use crate::error::AppError;

/// Map a unique-constraint violation to `Conflict`, anything else through `From<DbErr>`.
pub(crate) fn conflict_on_unique(err: DbErr, message: impl FnOnce() -> String) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Unique constraint violation caught on write");
            AppError::Conflict(message())
        }
        _ => AppError::from(err),
    }
}
