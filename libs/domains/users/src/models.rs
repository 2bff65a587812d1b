use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::entity::{self, User};

/// Runs the entity's email rule inside `validator`
fn validate_email_field(email: &str) -> Result<(), validator::ValidationError> {
    entity::validate_email(email).map_err(|_| validator::ValidationError::new("invalid_email"))
}

/// User response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            active: user.is_active(),
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "validate_email_field"))]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// DTO for replacing a user's email and name
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "validate_email_field"))]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// Query for looking a user up by email
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

/// Activity flag for a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub id: String,
    pub active: bool,
}
