pub mod category;
pub mod event;
pub mod photo;
pub mod user;
