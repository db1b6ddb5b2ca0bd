use chrono::{DateTime, Utc};
use sea_orm::sea_query::LockType;
use sea_orm::*;

use super::conflict_on_unique;
use crate::entity::{event, user};
use crate::error::AppError;
use crate::models::user::UserRequest;
use crate::utils::hash;

pub struct UserService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, req: UserRequest, now: DateTime<Utc>) -> Result<user::Model, AppError> {
        let mut model = user::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        };
        apply_request(&mut model, req)?;
        model.insert(self.conn).await.map_err(|e| {
            conflict_on_unique(e, || "Username or email is already taken".into())
        })
    }

    pub async fn read_by_id(&self, id: i32) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))
    }

    pub async fn read_by_username(&self, username: &str) -> Result<user::Model, AppError> {
        let username = username.trim();
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))
    }

    /// Replace every field of a user. `created_at` is kept.
    pub async fn update(&self, id: i32, req: UserRequest) -> Result<user::Model, AppError> {
        let existing = self.read_by_id(id).await?;
        let mut active: user::ActiveModel = existing.into();
        apply_request(&mut active, req)?;
        active.update(self.conn).await.map_err(|e| {
            conflict_on_unique(e, || "Username or email is already taken".into())
        })
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, AppError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await?)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> UserService<'a, C> {
    /// Delete a user that owns no events.
    ///
    /// The user row is locked first so no event can start referencing it
    /// between the ownership count and the delete.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;

        let existing = user::Entity::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

        let owned = event::Entity::find()
            .filter(event::Column::OwnerId.eq(id))
            .count(&txn)
            .await?;
        if owned > 0 {
            return Err(AppError::Conflict(format!(
                "User '{}' still owns {owned} event(s)",
                existing.username
            )));
        }

        user::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

fn apply_request(active: &mut user::ActiveModel, req: UserRequest) -> Result<(), AppError> {
    let password = hash::hash_password(&req.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    active.first_name = Set(req.first_name.trim().to_string());
    active.last_name = Set(req.last_name.trim().to_string());
    active.username = Set(req.username.trim().to_string());
    active.email = Set(req.email.trim().to_lowercase());
    active.password = Set(password);
    active.profile_image = Set(req.profile_image);
    active.description = Set(req.description);
    active.city = Set(req.city);
    active.birth_date = Set(req.birth_date);
    active.gender = Set(req.gender);
    Ok(())
}
