#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temporal state of an event relative to a reference instant.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum EventState {
    /// The event has not started yet.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Upcoming"))]
    Upcoming,
    /// The event is in progress (both window boundaries included).
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Live"))]
    Live,
    /// The event window has closed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Past"))]
    Past,
}

impl EventState {
    /// All possible state values.
    pub const ALL: &'static [EventState] = &[Self::Upcoming, Self::Live, Self::Past];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Live => "Live",
            Self::Past => "Past",
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection raised when an event window is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("start_at ({start_at}) must be strictly before expire_at ({expire_at})")]
    NotValidDate {
        start_at: DateTime<Utc>,
        expire_at: DateTime<Utc>,
    },
}

/// Check that `start_at` is strictly earlier than `expire_at`.
///
/// Equal instants are rejected as well as reversed ones. Nothing else is
/// checked here: a window entirely in the past is still a valid schedule.
pub fn validate_schedule(
    start_at: DateTime<Utc>,
    expire_at: DateTime<Utc>,
) -> Result<(), ScheduleError> {
    if start_at < expire_at {
        Ok(())
    } else {
        Err(ScheduleError::NotValidDate {
            start_at,
            expire_at,
        })
    }
}

/// Classify an event window as seen from `now`.
///
/// The window is closed on both ends: `now == start_at` and `now == expire_at`
/// are both [`EventState::Live`].
pub fn derive_state(
    now: DateTime<Utc>,
    start_at: DateTime<Utc>,
    expire_at: DateTime<Utc>,
) -> EventState {
    if now < start_at {
        EventState::Upcoming
    } else if now <= expire_at {
        EventState::Live
    } else {
        EventState::Past
    }
}
