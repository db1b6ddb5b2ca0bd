use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{EventState, derive_state};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{debug, info};
use uuid::Uuid;

use super::{CategoryService, PhotoService, UserService, conflict_on_unique};
use crate::embedding::Embedder;
use crate::entity::photo::DEFAULT_EVENT_PHOTO;
use crate::entity::{category, event, event_category, event_embedding, event_photo, photo};
use crate::error::AppError;
use crate::models::event::{EventRequest, EventResponse, validate_event_request};

/// An event together with the categories and photos linked to it.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub event: event::Model,
    pub categories: Vec<category::Model>,
    /// In display order.
    pub photos: Vec<photo::Model>,
}

impl EventDetails {
    pub fn render(self, fallback: Option<&photo::Model>, now: DateTime<Utc>) -> EventResponse {
        EventResponse::render(self.event, self.categories, self.photos, fallback, now)
    }
}

/// Everything an event write needs that lives outside the event row.
struct Prepared {
    categories: Vec<category::Model>,
    photos: Vec<photo::Model>,
    vector: Vec<f32>,
    model_name: String,
}

pub struct EventService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait<Transaction = DatabaseTransaction>> EventService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Create an event.
    ///
    /// The request is validated (schedule first) and every reference resolved
    /// before the single transaction that writes the row, its links and its
    /// embedding. `participant_count` starts at 0 and `created_at` is `now`.
    pub async fn create(
        &self,
        req: EventRequest,
        embedder: &dyn Embedder,
        now: DateTime<Utc>,
    ) -> Result<EventDetails, AppError> {
        validate_event_request(&req)?;
        let prepared = self.prepare(&req, embedder).await?;

        let id = Uuid::new_v4();
        let title = req.title.trim().to_string();
        let state = derive_state(now, req.start_at, req.expire_at);

        let txn = self.conn.begin().await?;
        let model = event::ActiveModel {
            id: Set(id),
            title: Set(title.clone()),
            description: Set(req.description),
            location: Set(req.location.trim().to_string()),
            latitude: Set(req.latitude),
            longitude: Set(req.longitude),
            max_participants: Set(req.max_participants),
            participant_count: Set(0),
            with_owner: Set(req.with_owner),
            start_at: Set(req.start_at),
            expire_at: Set(req.expire_at),
            state: Set(state),
            owner_id: Set(req.owner_id),
            created_at: Set(now),
            ..Default::default()
        };
        let event = model
            .insert(&txn)
            .await
            .map_err(|e| conflict_on_unique(e, || title_taken(&title)))?;

        write_links(&txn, id, &prepared, now).await?;
        txn.commit().await?;

        info!(event_id = %id, %state, "Created event");
        Ok(EventDetails {
            event,
            categories: prepared.categories,
            photos: prepared.photos,
        })
    }

    /// Replace every client-settable field of an event.
    ///
    /// `created_at` and `participant_count` are kept; category and photo links
    /// and the embedding are rewritten as a whole.
    pub async fn update(
        &self,
        id: Uuid,
        req: EventRequest,
        embedder: &dyn Embedder,
        now: DateTime<Utc>,
    ) -> Result<EventDetails, AppError> {
        validate_event_request(&req)?;
        self.find_model(id).await?;
        let prepared = self.prepare(&req, embedder).await?;

        let title = req.title.trim().to_string();
        let state = derive_state(now, req.start_at, req.expire_at);

        let txn = self.conn.begin().await?;
        let existing = find_event_for_update(&txn, id).await?;
        if req.max_participants < existing.participant_count {
            return Err(AppError::Validation(format!(
                "max_participants cannot be below the current participant count ({})",
                existing.participant_count
            )));
        }

        let mut active: event::ActiveModel = existing.into();
        active.title = Set(title.clone());
        active.description = Set(req.description);
        active.location = Set(req.location.trim().to_string());
        active.latitude = Set(req.latitude);
        active.longitude = Set(req.longitude);
        active.max_participants = Set(req.max_participants);
        active.with_owner = Set(req.with_owner);
        active.start_at = Set(req.start_at);
        active.expire_at = Set(req.expire_at);
        active.state = Set(state);
        active.owner_id = Set(req.owner_id);

        let event = active
            .update(&txn)
            .await
            .map_err(|e| conflict_on_unique(e, || title_taken(&title)))?;

        clear_links(&txn, id).await?;
        write_links(&txn, id, &prepared, now).await?;
        txn.commit().await?;

        info!(event_id = %id, %state, "Updated event");
        Ok(EventDetails {
            event,
            categories: prepared.categories,
            photos: prepared.photos,
        })
    }

    /// Delete an event with its links and embedding. Categories and photos survive.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_event_for_update(&txn, id).await?;

        clear_links(&txn, id).await?;
        event::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        info!(event_id = %id, "Deleted event");
        Ok(())
    }

    pub async fn read_by_id(&self, id: Uuid) -> Result<EventDetails, AppError> {
        let event = self.find_model(id).await?;
        self.load_one(event).await
    }

    pub async fn read_by_title(&self, title: &str) -> Result<EventDetails, AppError> {
        let title = title.trim();
        let event = event::Entity::find()
            .filter(event::Column::Title.eq(title))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with title '{title}' not found")))?;
        self.load_one(event).await
    }

    /// All events ordered by start time, optionally only those in `state` as of `now`.
    ///
    /// The filter is evaluated against the schedule columns, not the stored state.
    pub async fn list(
        &self,
        state: Option<EventState>,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventDetails>, AppError> {
        let mut select = event::Entity::find();
        if let Some(state) = state {
            select = select.filter(state_condition(state, now));
        }
        let events = select
            .order_by_asc(event::Column::StartAt)
            .order_by_asc(event::Column::Title)
            .all(self.conn)
            .await?;
        self.load_details(events).await
    }

    async fn find_model(&self, id: Uuid) -> Result<event::Model, AppError> {
        event::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with id {id} not found")))
    }

    /// Resolve owner, categories and photos, then compute the embedding.
    async fn prepare(
        &self,
        req: &EventRequest,
        embedder: &dyn Embedder,
    ) -> Result<Prepared, AppError> {
        UserService::new(self.conn).read_by_id(req.owner_id).await?;

        let names: Vec<&str> = req.categories.iter().map(|c| c.name.trim()).collect();
        let categories = CategoryService::new(self.conn)
            .resolve_names(&names)
            .await?;
        let photos = PhotoService::new(self.conn)
            .resolve_ids(&req.photo_ids)
            .await?;
        if photos.iter().any(|p| p.photo_name == DEFAULT_EVENT_PHOTO) {
            return Err(AppError::Validation(format!(
                "Photo '{DEFAULT_EVENT_PHOTO}' is shown automatically and cannot be attached to an event"
            )));
        }

        let vector = embedder.embed(&req.description).await?;
        debug!(dimensions = vector.len(), "Embedded event description");

        Ok(Prepared {
            categories,
            photos,
            vector,
            model_name: embedder.model_name().to_string(),
        })
    }

    async fn load_one(&self, event: event::Model) -> Result<EventDetails, AppError> {
        let mut details = self.load_details(vec![event]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("Loaded event vanished".into()))
    }

    async fn load_details(&self, events: Vec<event::Model>) -> Result<Vec<EventDetails>, AppError> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();

        let category_rows = event_category::Entity::find()
            .filter(event_category::Column::EventId.is_in(ids.clone()))
            .find_also_related(category::Entity)
            .order_by_asc(category::Column::Name)
            .all(self.conn)
            .await?;
        let mut categories: HashMap<Uuid, Vec<category::Model>> = HashMap::new();
        for (link, category) in category_rows {
            if let Some(category) = category {
                categories.entry(link.event_id).or_default().push(category);
            }
        }

        let photo_rows = event_photo::Entity::find()
            .filter(event_photo::Column::EventId.is_in(ids))
            .find_also_related(photo::Entity)
            .order_by_asc(event_photo::Column::Position)
            .all(self.conn)
            .await?;
        let mut photos: HashMap<Uuid, Vec<photo::Model>> = HashMap::new();
        for (link, photo) in photo_rows {
            if let Some(photo) = photo {
                photos.entry(link.event_id).or_default().push(photo);
            }
        }

        Ok(events
            .into_iter()
            .map(|event| EventDetails {
                categories: categories.remove(&event.id).unwrap_or_default(),
                photos: photos.remove(&event.id).unwrap_or_default(),
                event,
            })
            .collect())
    }
}

/// Translate a state into schedule predicates that agree with `derive_state`.
pub fn state_condition(state: EventState, now: DateTime<Utc>) -> Condition {
    match state {
        EventState::Upcoming => Condition::all().add(event::Column::StartAt.gt(now)),
        EventState::Live => Condition::all()
            .add(event::Column::StartAt.lte(now))
            .add(event::Column::ExpireAt.gte(now)),
        EventState::Past => Condition::all().add(event::Column::ExpireAt.lt(now)),
    }
}

fn title_taken(title: &str) -> String {
    format!("An event titled '{title}' already exists")
}

async fn find_event_for_update(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {id} not found")))
}

async fn clear_links(txn: &DatabaseTransaction, id: Uuid) -> Result<(), DbErr> {
    event_category::Entity::delete_many()
        .filter(event_category::Column::EventId.eq(id))
        .exec(txn)
        .await?;
    event_photo::Entity::delete_many()
        .filter(event_photo::Column::EventId.eq(id))
        .exec(txn)
        .await?;
    event_embedding::Entity::delete_many()
        .filter(event_embedding::Column::EventId.eq(id))
        .exec(txn)
        .await?;
    Ok(())
}

async fn write_links(
    txn: &DatabaseTransaction,
    id: Uuid,
    prepared: &Prepared,
    now: DateTime<Utc>,
) -> Result<(), DbErr> {
    if !prepared.categories.is_empty() {
        event_category::Entity::insert_many(prepared.categories.iter().map(|c| {
            event_category::ActiveModel {
                event_id: Set(id),
                category_id: Set(c.id),
            }
        }))
        .exec_without_returning(txn)
        .await?;
    }

    if !prepared.photos.is_empty() {
        event_photo::Entity::insert_many(prepared.photos.iter().enumerate().map(|(i, p)| {
            event_photo::ActiveModel {
                event_id: Set(id),
                photo_id: Set(p.id),
                position: Set(i as i32),
            }
        }))
        .exec_without_returning(txn)
        .await?;
    }

    event_embedding::Entity::insert(event_embedding::ActiveModel {
        event_id: Set(id),
        model: Set(prepared.model_name.clone()),
        vector: Set(serde_json::json!(prepared.vector)),
        created_at: Set(now),
    })
    .exec_without_returning(txn)
    .await?;

    Ok(())
}
