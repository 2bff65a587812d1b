use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entity::{Email, User, UserId};
use crate::error::{UserError, UserResult};

/// Repository trait for User persistence
///
/// Duplicate detection is not the repository's job, except through
/// [`UserRepository::insert_if_email_absent`], which must check and insert
/// atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or overwrite a user by ID
    async fn save(&self, user: User) -> UserResult<()>;

    /// Get a user by ID
    async fn find_by_id(&self, id: &UserId) -> UserResult<User>;

    /// Get the first user with exactly this email
    async fn find_by_email(&self, email: &str) -> UserResult<User>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> UserResult<()>;

    /// Delete a user by ID
    async fn delete(&self, id: &UserId) -> UserResult<()>;

    /// Insert a user unless another user already has the same email
    async fn insert_if_email_absent(&self, user: User) -> UserResult<()>;
}

/// Rejects values a repository must never store
fn ensure_storable(user: &User) -> UserResult<()> {
    if user.id().is_empty() || user.validate().is_err() {
        return Err(UserError::InvalidUser);
    }
    Ok(())
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Nothing is persisted. Clones share the same store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn has_email(users: &HashMap<UserId, User>, email: &Email) -> bool {
    users.values().any(|u| u.email() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> UserResult<()> {
        ensure_storable(&user)?;

        let mut users = self.users.write().await;
        tracing::info!(user_id = %user.id(), "Saved user");
        users.insert(user.id().clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> UserResult<User> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserError::UserNotFound)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email().as_str() == email)
            .cloned()
            .ok_or(UserError::UserNotFound)
    }

    async fn update(&self, user: User) -> UserResult<()> {
        ensure_storable(&user)?;

        let mut users = self.users.write().await;
        let Some(existing) = users.get_mut(user.id()) else {
            return Err(UserError::UserNotFound);
        };

        tracing::info!(user_id = %user.id(), "Updated user");
        *existing = user;
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.remove(id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(())
        } else {
            Err(UserError::UserNotFound)
        }
    }

    async fn insert_if_email_absent(&self, user: User) -> UserResult<()> {
        ensure_storable(&user)?;

        // Check and insert under one write lock
        let mut users = self.users.write().await;
        if has_email(&users, user.email()) {
            return Err(UserError::UserAlreadyExists);
        }

        tracing::info!(user_id = %user.id(), email = %user.email(), "Created user");
        users.insert(user.id().clone(), user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(email: &str) -> User {
        User::new(email, "Test User").unwrap()
    }

    fn invalid_user() -> User {
        let now = Utc::now();
        User::restore(UserId::from(""), "test@example.com", "Test User", now, now)
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("test@example.com");

        repo.save(user.clone()).await.unwrap();

        let found = repo.find_by_id(user.id()).await.unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_save_overwrites_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("test@example.com");
        repo.save(user.clone()).await.unwrap();

        let changed = user.with_changes("other@example.com", "Other").unwrap();
        repo.save(changed.clone()).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(user.id()).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn test_save_does_not_check_duplicates() {
        let repo = InMemoryUserRepository::new();

        repo.save(test_user("test@example.com")).await.unwrap();
        repo.save(test_user("test@example.com")).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_save_invalid_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.save(invalid_user()).await;
        assert_eq!(result, Err(UserError::InvalidUser));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_restored_user_with_bad_email() {
        let repo = InMemoryUserRepository::new();
        let now = Utc::now();
        let user = User::restore(UserId::from("user_1"), "nope", "Name", now, now);

        assert_eq!(repo.save(user).await, Err(UserError::InvalidUser));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo.find_by_id(&UserId::from("non-existent-id")).await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("test@example.com");
        repo.save(user.clone()).await.unwrap();

        let found = repo.find_by_email("test@example.com").await.unwrap();
        assert_eq!(found.id(), user.id());
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.save(test_user("test@example.com")).await.unwrap();

        let result = repo.find_by_email("TEST@example.com").await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_find_by_email_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo.find_by_email("notfound@example.com").await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let mut user = test_user("test@example.com");
        repo.save(user.clone()).await.unwrap();

        user.update("updated@example.com", "Updated Name").unwrap();
        repo.update(user.clone()).await.unwrap();

        let found = repo.find_by_id(user.id()).await.unwrap();
        assert_eq!(found.email().as_str(), "updated@example.com");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(test_user("test@example.com")).await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_invalid_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(invalid_user()).await;
        assert_eq!(result, Err(UserError::InvalidUser));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("test@example.com");
        repo.save(user.clone()).await.unwrap();

        repo.delete(user.id()).await.unwrap();

        let result = repo.find_by_id(user.id()).await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo.delete(&UserId::from("non-existent-id")).await;
        assert_eq!(result, Err(UserError::UserNotFound));
    }

    #[tokio::test]
    async fn test_insert_if_email_absent() {
        let repo = InMemoryUserRepository::new();

        repo.insert_if_email_absent(test_user("test@example.com"))
            .await
            .unwrap();

        let result = repo
            .insert_if_email_absent(test_user("test@example.com"))
            .await;
        assert_eq!(result, Err(UserError::UserAlreadyExists));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_one_user_per_email() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_if_email_absent(test_user("race@example.com"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.len().await, 1);
    }
}
