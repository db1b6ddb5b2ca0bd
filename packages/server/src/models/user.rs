use chrono::{DateTime, NaiveDate, Utc};
use common::Gender;
use serde::{Deserialize, Serialize};

use super::shared::{validate_optional_text, validate_text};
use crate::error::AppError;

/// Request body for creating a user or replacing all of a user's fields.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UserRequest {
    #[schema(example = "Olena")]
    pub first_name: String,
    #[schema(example = "Koval")]
    pub last_name: String,
    /// Unique username (1-32 chars, alphanumeric and underscores).
    #[schema(example = "olena_k")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "olena@example.com")]
    pub email: String,
    /// Password (8-128 characters). Stored as an Argon2 hash.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    pub profile_image: Option<String>,
    pub description: Option<String>,
    #[schema(example = "Lviv")]
    pub city: Option<String>,
    #[schema(example = "1996-04-21")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

pub fn validate_user_request(req: &UserRequest) -> Result<(), AppError> {
    validate_text(&req.first_name, "First name", 64)?;
    validate_text(&req.last_name, "Last name", 64)?;

    let username = req.username.trim();
    validate_text(username, "Username", 32)?;
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }

    let email = req.email.trim();
    validate_text(email, "Email", 254)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(AppError::Validation("Email address is not valid".into())),
    }

    if req.password.len() < 8 || req.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }

    validate_optional_text(req.profile_image.as_deref(), "Profile image", 2048)?;
    validate_optional_text(req.description.as_deref(), "Description", 4096)?;
    validate_optional_text(req.city.as_deref(), "City", 128)?;
    Ok(())
}

/// Public view of a user. The password hash is never rendered.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            username: m.username,
            email: m.email,
            profile_image: m.profile_image,
            description: m.description,
            city: m.city,
            birth_date: m.birth_date,
            gender: m.gender,
            created_at: m.created_at,
        }
    }
}
