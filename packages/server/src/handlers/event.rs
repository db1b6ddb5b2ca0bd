use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::event::{EventListQuery, EventRequest, EventResponse};
use crate::services::{EventService, PhotoService};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create a new event",
    description = "Validates the schedule (start_at strictly before expire_at) before anything else, resolves the owner, categories (by name) and photos (by id), computes the description embedding and stores the event in one transaction. The event starts with zero participants.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request (VALIDATION_ERROR, INVALID_SCHEDULE)", body = ErrorBody),
        (status = 404, description = "Unknown owner, category or photo (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Title already used (CONFLICT)", body = ErrorBody),
        (status = 502, description = "Embedding service failed (EMBEDDING_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_event(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let details = EventService::new(&state.db)
        .create(payload, state.embedder.as_ref(), now)
        .await?;
    let fallback = PhotoService::new(&state.db).default_photo().await?;

    Ok((
        StatusCode::CREATED,
        Json(details.render(fallback.as_ref(), now)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List events",
    description = "Returns every event ordered by start time. The optional `state` filter is evaluated against the schedule at request time.",
    params(EventListQuery),
    responses(
        (status = 200, description = "Events", body = Vec<EventResponse>),
        (status = 400, description = "Unknown state (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(state_filter = ?query.state))]
pub async fn list_events(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<EventListQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let now = Utc::now();
    let events = EventService::new(&state.db).list(query.state, now).await?;
    let fallback = PhotoService::new(&state.db).default_photo().await?;

    Ok(Json(
        events
            .into_iter()
            .map(|details| details.render(fallback.as_ref(), now))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    operation_id = "getEvent",
    summary = "Get an event by ID",
    description = "The returned `state` is derived from the schedule at request time.",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    let details = EventService::new(&state.db).read_by_id(id).await?;
    let fallback = PhotoService::new(&state.db).default_photo().await?;
    Ok(Json(details.render(fallback.as_ref(), Utc::now())))
}

#[utoipa::path(
    get,
    path = "/by-title/{title}",
    tag = "Events",
    operation_id = "getEventByTitle",
    summary = "Get an event by its title",
    params(("title" = String, Path, description = "Exact event title")),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_event_by_title(
    State(state): State<AppState>,
    AppPath(title): AppPath<String>,
) -> Result<Json<EventResponse>, AppError> {
    let details = EventService::new(&state.db).read_by_title(&title).await?;
    let fallback = PhotoService::new(&state.db).default_photo().await?;
    Ok(Json(details.render(fallback.as_ref(), Utc::now())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Replace an event",
    description = "Full update: every field of the request overwrites the stored value and the category and photo lists replace the existing links. `created_at` and `participant_count` are preserved. The schedule is validated before anything is changed.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Invalid request (VALIDATION_ERROR, INVALID_SCHEDULE)", body = ErrorBody),
        (status = 404, description = "Event, owner, category or photo not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Title already used (CONFLICT)", body = ErrorBody),
        (status = 502, description = "Embedding service failed (EMBEDDING_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn update_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<EventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let now = Utc::now();
    let details = EventService::new(&state.db)
        .update(id, payload, state.embedder.as_ref(), now)
        .await?;
    let fallback = PhotoService::new(&state.db).default_photo().await?;
    Ok(Json(details.render(fallback.as_ref(), now)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Removes the event, its category and photo links and its embedding. Categories and photos themselves are kept.",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    EventService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
