pub mod category;
pub mod event;
pub mod event_category;
pub mod event_embedding;
pub mod event_photo;
pub mod photo;
pub mod user;
