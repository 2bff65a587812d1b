use std::sync::Arc;
use tracing::instrument;

use crate::entity::{User, UserId};
use crate::error::{Context, ServiceError, ServiceResult, UserError};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Each call is one short sequence of repository operations; any failure
/// aborts it and is returned with the step that failed.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user, rejecting an email that is already registered
    #[instrument(skip(self, name))]
    pub async fn create_user(&self, email: &str, name: &str) -> ServiceResult<User> {
        match self.repository.find_by_email(email).await {
            Ok(_) => return Err(UserError::UserAlreadyExists.into()),
            Err(UserError::UserNotFound) => {}
            // insert_if_email_absent still guards uniqueness below
            Err(e) => tracing::warn!(error = %e, "Email lookup failed before create, continuing"),
        }

        let user = User::new(email, name).context("failed to create user")?;

        match self.repository.insert_if_email_absent(user.clone()).await {
            Ok(()) => Ok(user),
            Err(UserError::UserAlreadyExists) => Err(UserError::UserAlreadyExists.into()),
            Err(e) => Err(ServiceError::new("failed to save user", e)),
        }
    }

    /// Get a user by ID
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user_by_id(&self, id: &UserId) -> ServiceResult<User> {
        self.repository
            .find_by_id(id)
            .await
            .context("failed to get user by ID")
    }

    /// Get a user by email
    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> ServiceResult<User> {
        self.repository
            .find_by_email(email)
            .await
            .context("failed to get user by email")
    }

    /// Replace a user's email and name.
    ///
    /// The new values are validated into a candidate first; the stored user
    /// only changes once the repository accepts the candidate.
    #[instrument(skip(self, name), fields(user_id = %id))]
    pub async fn update_user(&self, id: &UserId, email: &str, name: &str) -> ServiceResult<User> {
        let current = self
            .repository
            .find_by_id(id)
            .await
            .context("failed to find user for update")?;

        let candidate = current
            .with_changes(email, name)
            .context("failed to update user")?;

        self.repository
            .update(candidate.clone())
            .await
            .context("failed to save updated user")?;

        Ok(candidate)
    }

    /// Delete a user by ID.
    ///
    /// Existence check and delete are two separate repository calls, so this
    /// assumes a single writer per user.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> ServiceResult<()> {
        self.repository
            .find_by_id(id)
            .await
            .context("failed to find user for deletion")?;

        self.repository
            .delete(id)
            .await
            .context("failed to delete user")
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn is_user_active(&self, id: &UserId) -> ServiceResult<bool> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .context("failed to find user")?;

        Ok(user.is_active())
    }
}
