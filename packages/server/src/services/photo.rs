use chrono::{DateTime, Utc};
use sea_orm::*;

use super::conflict_on_unique;
use crate::entity::photo::DEFAULT_EVENT_PHOTO;
use crate::entity::{event_photo, photo};
use crate::error::AppError;
use crate::models::photo::PhotoRequest;

pub struct PhotoService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> PhotoService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        req: PhotoRequest,
        now: DateTime<Utc>,
    ) -> Result<photo::Model, AppError> {
        let photo_name = req.photo_name.trim().to_string();
        let model = photo::ActiveModel {
            photo_name: Set(photo_name.clone()),
            url: Set(req.url.trim().to_string()),
            created_at: Set(now),
            ..Default::default()
        };
        model.insert(self.conn).await.map_err(|e| {
            conflict_on_unique(e, || format!("Photo '{photo_name}' already exists"))
        })
    }

    pub async fn read_by_id(&self, id: i32) -> Result<photo::Model, AppError> {
        photo::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Photo with id {id} not found")))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<photo::Model>, AppError> {
        Ok(photo::Entity::find()
            .filter(photo::Column::PhotoName.eq(name))
            .one(self.conn)
            .await?)
    }

    /// The photo rendered for events without photos of their own.
    pub async fn default_photo(&self) -> Result<Option<photo::Model>, AppError> {
        self.find_by_name(DEFAULT_EVENT_PHOTO).await
    }

    /// Resolve photo IDs to rows, keeping the order of `ids`.
    pub async fn resolve_ids(&self, ids: &[i32]) -> Result<Vec<photo::Model>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = photo::Entity::find()
            .filter(photo::Column::Id.is_in(ids.to_vec()))
            .all(self.conn)
            .await?;

        let mut resolved = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for &id in ids {
            match found.iter().find(|p| p.id == id) {
                Some(p) => resolved.push(p.clone()),
                None => missing.push(id.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::NotFound(format!(
                "Unknown photo ids: {}",
                missing.join(", ")
            )));
        }
        Ok(resolved)
    }

    pub async fn update(&self, id: i32, req: PhotoRequest) -> Result<photo::Model, AppError> {
        let existing = self.read_by_id(id).await?;
        let photo_name = req.photo_name.trim().to_string();
        if existing.photo_name == DEFAULT_EVENT_PHOTO && photo_name != DEFAULT_EVENT_PHOTO {
            return Err(AppError::Conflict(format!(
                "Photo '{DEFAULT_EVENT_PHOTO}' is reserved and cannot be renamed"
            )));
        }

        let mut active: photo::ActiveModel = existing.into();
        active.photo_name = Set(photo_name.clone());
        active.url = Set(req.url.trim().to_string());
        active.update(self.conn).await.map_err(|e| {
            conflict_on_unique(e, || format!("Photo '{photo_name}' already exists"))
        })
    }

    /// Delete a photo and detach it from every event.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;

        let existing = photo::Entity::find_by_id(id)
            .lock(sea_orm::sea_query::LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Photo with id {id} not found")))?;
        if existing.photo_name == DEFAULT_EVENT_PHOTO {
            return Err(AppError::Conflict(format!(
                "Photo '{DEFAULT_EVENT_PHOTO}' is reserved and cannot be deleted"
            )));
        }

        event_photo::Entity::delete_many()
            .filter(event_photo::Column::PhotoId.eq(id))
            .exec(&txn)
            .await?;
        photo::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<photo::Model>, AppError> {
        Ok(photo::Entity::find()
            .order_by_asc(photo::Column::Id)
            .all(self.conn)
            .await?)
    }
}
