//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

use chirpy_core::entities::{NewUser, PasswordHash, User};
use chirpy_core::error::DomainError;
use chirpy_core::traits::{RepoResult, UserRepository};
use chirpy_core::value_objects::UserId;

/// In-memory user repository
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<UserId, User>>,
    by_email: Arc<DashMap<String, UserId>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, replacing any row with the same id
    pub fn insert_user(&self, user: User) {
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    /// Remove a user row, as an external deletion would
    pub fn remove_user(&self, id: UserId) -> Option<User> {
        let (_, user) = self.users.remove(&id)?;
        self.by_email.remove(&user.email);
        Some(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let user = User::from(user);

        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn update_credentials(
        &self,
        id: UserId,
        email: &str,
        password_hash: &PasswordHash,
    ) -> RepoResult<User> {
        let old_email = self
            .users
            .get(&id)
            .map(|r| r.email.clone())
            .ok_or(DomainError::UserNotFound(id))?;

        if old_email != email {
            match self.by_email.entry(email.to_string()) {
                Entry::Occupied(_) => return Err(DomainError::EmailAlreadyExists),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.by_email.remove(&old_email);
        }

        let mut user = self
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.email = email.to_string();
        user.password_hash = password_hash.clone();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: PasswordHash::new("$argon2id$stub"),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("a@x.com")).await.unwrap();

        let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
        let by_email = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@x.com")).await.unwrap();

        let result = repo.create(new_user("a@x.com")).await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyExists)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_update_credentials_moves_email_index() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("a@x.com")).await.unwrap();

        let updated = repo
            .update_credentials(user.id, "b@x.com", &PasswordHash::new("new"))
            .await
            .unwrap();
        assert_eq!(updated.email, "b@x.com");
        assert_eq!(updated.password_hash.expose(), "new");
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_credentials_conflict_and_missing() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(new_user("a@x.com")).await.unwrap();
        repo.create(new_user("b@x.com")).await.unwrap();

        let result = repo
            .update_credentials(a.id, "b@x.com", &PasswordHash::new("h"))
            .await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyExists)));

        let result = repo
            .update_credentials(UserId::generate(), "c@x.com", &PasswordHash::new("h"))
            .await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }
}
