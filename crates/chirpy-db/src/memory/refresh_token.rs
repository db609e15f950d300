//! In-memory refresh token repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

use chirpy_core::entities::RefreshToken;
use chirpy_core::error::DomainError;
use chirpy_core::traits::{RefreshTokenRepository, RepoResult};

/// In-memory refresh token repository
#[derive(Default, Clone)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<DashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token row directly, e.g. one that is already expired
    pub fn insert_token(&self, token: RefreshToken) {
        self.tokens.insert(token.token.clone(), token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: &RefreshToken) -> RepoResult<()> {
        match self.tokens.entry(token.token.clone()) {
            Entry::Occupied(_) => Err(DomainError::RefreshTokenExists),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|r| r.value().clone()))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> RepoResult<bool> {
        // Single shard lock, so concurrent revokes are last-write-wins
        match self.tokens.get_mut(token) {
            Some(mut row) => {
                row.revoked_at = Some(revoked_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_core::value_objects::UserId;
    use chrono::Duration;

    fn token(value: &str) -> RefreshToken {
        RefreshToken::issue(value.to_string(), UserId::generate(), Utc::now(), Duration::days(60))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryRefreshTokenRepository::new();
        let rt = token("aa");
        repo.create(&rt).await.unwrap();

        assert_eq!(repo.find_by_token("aa").await.unwrap(), Some(rt));
        assert!(repo.find_by_token("bb").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.create(&token("aa")).await.unwrap();

        let result = repo.create(&token("aa")).await;
        assert!(matches!(result, Err(DomainError::RefreshTokenExists)));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.create(&token("aa")).await.unwrap();

        let first = Utc::now();
        assert!(repo.revoke("aa", first).await.unwrap());
        let second = first + Duration::seconds(5);
        assert!(repo.revoke("aa", second).await.unwrap());

        let row = repo.find_by_token("aa").await.unwrap().unwrap();
        assert_eq!(row.revoked_at, Some(second));
        assert!(!repo.revoke("missing", first).await.unwrap());
    }
}
