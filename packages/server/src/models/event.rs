use chrono::{DateTime, Utc};
use common::{EventState, derive_state, validate_schedule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{CategoryRequest, CategoryResponse, validate_category_request};
use super::photo::PhotoResponse;
use super::shared::{validate_text, validate_title, validate_unique_refs};
use crate::entity::{category, event, photo};
use crate::error::AppError;

/// Upper bound on categories and photos referenced by one event.
pub const MAX_EVENT_REFS: usize = 32;

/// Full description of an event, used both to create and to replace one.
///
/// Updates are not partial: every field here overwrites the stored value, and
/// the category and photo lists replace the existing links as a whole.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct EventRequest {
    /// Unique event title (1-256 characters).
    #[schema(example = "Riverside Jazz Night")]
    pub title: String,
    #[schema(example = "Open-air jazz with three local bands.")]
    pub description: String,
    #[schema(example = "Shevchenko Park, Lviv")]
    pub location: String,
    #[schema(example = 49.8397)]
    pub latitude: f64,
    #[schema(example = 24.0297)]
    pub longitude: f64,
    /// Capacity, at least 1.
    #[schema(example = 150)]
    pub max_participants: i32,
    /// Must be strictly before `expire_at`.
    #[schema(example = "2025-01-10T18:00:00Z")]
    pub start_at: DateTime<Utc>,
    #[schema(example = "2025-01-10T23:00:00Z")]
    pub expire_at: DateTime<Utc>,
    #[serde(default)]
    pub with_owner: bool,
    /// ID of an existing user.
    #[schema(example = 42)]
    pub owner_id: i32,
    /// Existing categories, referenced by name.
    #[serde(default)]
    pub categories: Vec<CategoryRequest>,
    /// Existing photos, in display order.
    #[serde(default)]
    pub photo_ids: Vec<i32>,
}

/// Validate an event request. The schedule is checked before anything else.
pub fn validate_event_request(req: &EventRequest) -> Result<(), AppError> {
    validate_schedule(req.start_at, req.expire_at)?;

    validate_title(&req.title)?;
    if req.description.trim().is_empty() || req.description.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Description must be non-empty and at most 1MB".into(),
        ));
    }
    validate_text(&req.location, "Location", 512)?;
    if !req.latitude.is_finite() || !(-90.0..=90.0).contains(&req.latitude) {
        return Err(AppError::Validation(
            "Latitude must be between -90 and 90".into(),
        ));
    }
    if !req.longitude.is_finite() || !(-180.0..=180.0).contains(&req.longitude) {
        return Err(AppError::Validation(
            "Longitude must be between -180 and 180".into(),
        ));
    }
    if req.max_participants < 1 {
        return Err(AppError::Validation(
            "max_participants must be at least 1".into(),
        ));
    }

    for category in &req.categories {
        validate_category_request(category)?;
    }
    let names: Vec<&str> = req.categories.iter().map(|c| c.name.trim()).collect();
    validate_unique_refs(&names, "categories", MAX_EVENT_REFS)?;
    validate_unique_refs(&req.photo_ids, "photo_ids", MAX_EVENT_REFS)?;
    Ok(())
}

/// Query parameters for listing events.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    /// Only return events in this state as of the time of the request.
    pub state: Option<EventState>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub max_participants: i32,
    pub participant_count: i32,
    pub with_owner: bool,
    pub created_at: DateTime<Utc>,
    pub start_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    /// Derived from the schedule at the moment the response was built.
    pub state: EventState,
    pub owner_id: i32,
    pub categories: Vec<CategoryResponse>,
    /// Never empty when the default photo exists: events without photos get it.
    pub photos: Vec<PhotoResponse>,
}

impl EventResponse {
    /// Render an event as of `now`.
    ///
    /// The stored `state` column is ignored; the state is derived again from
    /// the schedule. `fallback` is shown in place of an empty photo list.
    pub fn render(
        event: event::Model,
        categories: Vec<category::Model>,
        photos: Vec<photo::Model>,
        fallback: Option<&photo::Model>,
        now: DateTime<Utc>,
    ) -> Self {
        let photos = photos_or_fallback(
            photos.into_iter().map(PhotoResponse::from).collect(),
            fallback.cloned().map(PhotoResponse::from),
        );

        Self {
            state: derive_state(now, event.start_at, event.expire_at),
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            latitude: event.latitude,
            longitude: event.longitude,
            max_participants: event.max_participants,
            participant_count: event.participant_count,
            with_owner: event.with_owner,
            created_at: event.created_at,
            start_at: event.start_at,
            expire_at: event.expire_at,
            owner_id: event.owner_id,
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
            photos,
        }
    }
}

/// Return `photos` unchanged, or just the fallback when there are none.
pub fn photos_or_fallback(
    photos: Vec<PhotoResponse>,
    fallback: Option<PhotoResponse>,
) -> Vec<PhotoResponse> {
    if !photos.is_empty() {
        return photos;
    }
    match fallback {
        Some(photo) => vec![photo],
        None => {
            tracing::warn!("Default event photo is missing, rendering without photos");
            Vec::new()
        }
    }
}
