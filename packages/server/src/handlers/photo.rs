use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::photo::{PhotoRequest, PhotoResponse, validate_photo_request};
use crate::services::PhotoService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Photos",
    operation_id = "createPhoto",
    summary = "Register a photo",
    description = "Stores the photo record only; the image itself lives at `url`.",
    request_body = PhotoRequest,
    responses(
        (status = 201, description = "Photo created", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already used (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(photo_name = %payload.photo_name))]
pub async fn create_photo(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_photo_request(&payload)?;
    let model = PhotoService::new(&state.db)
        .create(payload, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(PhotoResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Photos",
    operation_id = "listPhotos",
    summary = "List photos",
    responses(
        (status = 200, description = "Photos", body = Vec<PhotoResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_photos(
    State(state): State<AppState>,
) -> Result<Json<Vec<PhotoResponse>>, AppError> {
    let photos = PhotoService::new(&state.db).list().await?;
    Ok(Json(photos.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Photos",
    operation_id = "getPhoto",
    summary = "Get a photo by ID",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo", body = PhotoResponse),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<PhotoResponse>, AppError> {
    let model = PhotoService::new(&state.db).read_by_id(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Photos",
    operation_id = "updatePhoto",
    summary = "Replace a photo record",
    description = "The reserved `eventDefaultImage` photo keeps its name but its url can change.",
    params(("id" = i32, Path, description = "Photo ID")),
    request_body = PhotoRequest,
    responses(
        (status = 200, description = "Photo updated", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already used or reserved (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(photo_name = %payload.photo_name))]
pub async fn update_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<PhotoRequest>,
) -> Result<Json<PhotoResponse>, AppError> {
    validate_photo_request(&payload)?;
    let model = PhotoService::new(&state.db).update(id, payload).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Photos",
    operation_id = "deletePhoto",
    summary = "Delete a photo",
    description = "Detaches the photo from every event before deleting it. The reserved default photo cannot be deleted.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Reserved photo (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    PhotoService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
