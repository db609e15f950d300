//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewUser, PasswordHash, RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    ///
    /// Fails with `EmailAlreadyExists` if the email is taken.
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    /// Replace email and password hash
    async fn update_credentials(
        &self,
        id: UserId,
        email: &str,
        password_hash: &PasswordHash,
    ) -> RepoResult<User>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new token row
    async fn create(&self, token: &RefreshToken) -> RepoResult<()>;

    /// Find a token row by its opaque value
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>>;

    /// Set `revoked_at` on the matching row in one atomic update
    ///
    /// Returns whether a row matched. Revoking an already revoked row simply
    /// overwrites the timestamp.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> RepoResult<bool>;
}
