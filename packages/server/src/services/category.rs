use chrono::{DateTime, Utc};
use sea_orm::*;

use super::conflict_on_unique;
use crate::entity::{category, event_category};
use crate::error::AppError;
use crate::models::category::CategoryRequest;

pub struct CategoryService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        req: CategoryRequest,
        now: DateTime<Utc>,
    ) -> Result<category::Model, AppError> {
        let name = req.name.trim().to_string();
        let model = category::ActiveModel {
            name: Set(name.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        model
            .insert(self.conn)
            .await
            .map_err(|e| conflict_on_unique(e, || format!("Category '{name}' already exists")))
    }

    pub async fn read_by_id(&self, id: i32) -> Result<category::Model, AppError> {
        category::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {id} not found")))
    }

    pub async fn read_by_name(&self, name: &str) -> Result<category::Model, AppError> {
        let name = name.trim();
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{name}' not found")))
    }

    /// Resolve category names to rows, keeping the order of `names`.
    /// Fails with `NotFound` naming every unknown category.
    pub async fn resolve_names(&self, names: &[&str]) -> Result<Vec<category::Model>, AppError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let found = category::Entity::find()
            .filter(category::Column::Name.is_in(names.iter().copied()))
            .all(self.conn)
            .await?;

        let mut resolved = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for &name in names {
            match found.iter().find(|c| c.name == name) {
                Some(c) => resolved.push(c.clone()),
                None => missing.push(name),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::NotFound(format!(
                "Unknown categories: {}",
                missing.join(", ")
            )));
        }
        Ok(resolved)
    }

    pub async fn rename(&self, id: i32, req: CategoryRequest) -> Result<category::Model, AppError> {
        let existing = self.read_by_id(id).await?;
        let name = req.name.trim().to_string();

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(name.clone());
        active
            .update(self.conn)
            .await
            .map_err(|e| conflict_on_unique(e, || format!("Category '{name}' already exists")))
    }

    /// Delete a category that no event references anymore.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let existing = self.read_by_id(id).await?;

        let in_use = event_category::Entity::find()
            .filter(event_category::Column::CategoryId.eq(id))
            .count(self.conn)
            .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category '{}' is used by {in_use} event(s)",
                existing.name
            )));
        }

        category::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<category::Model>, AppError> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(self.conn)
            .await?)
    }
}
